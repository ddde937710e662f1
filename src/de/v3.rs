//! Reader for MYGEO revision 3, the revision written by [crate::ser::v3].

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::{read_indices, read_points, read_uvs, Document};
use crate::{
    reader::{capacity_for, ByteReader},
    Flags, Header, Primitive, Result, Revision,
};

/// Decode a revision 3 stream. Each primitive's UV pairs are read iff the header sets
/// [Flags::UV_PRESENT].
pub fn read(r: impl Read) -> Result<Document> {
    let mut r = ByteReader::new(r);
    let header = Header::read_from(&mut r, Revision::V3)?;
    let points = read_points(&mut r, header.point_count)?;

    let with_uvs = header.flags.contains(Flags::UV_PRESENT);
    let mut primitives = Vec::with_capacity(capacity_for(header.prim_count));
    for _ in 0..header.prim_count {
        let indices = read_indices(&mut r)?;
        let uvs = if with_uvs {
            read_uvs(&mut r, indices.len())?
        } else {
            Vec::new()
        };
        primitives.push(Primitive::with_uvs(indices, uvs));
    }
    tracing::trace!(
        count = header.prim_count,
        with_uvs,
        "read primitive records"
    );

    Ok(Document {
        header,
        points,
        primitives,
    })
}

/// Decode a revision 3 buffer.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    read(bytes)
}

/// Decode the revision 3 file at `path`.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn read_file(path: impl AsRef<Path>) -> Result<Document> {
    read(BufReader::new(File::open(path.as_ref())?))
}
