//! Reader for MYGEO revision 2.
//!
//! Revision 2 shares the v3 header and point block, but its primitive records are only
//! `cornerCount` followed by the point indices: there is no UV block, whatever `flags` says.
//! `flags` is surfaced untouched.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::{read_indices, read_points, Document};
use crate::{
    reader::{capacity_for, ByteReader},
    Header, Primitive, Result, Revision,
};

/// Decode a revision 2 stream.
///
/// Point indices are returned as stored; they are not checked against the point count.
pub fn read(r: impl Read) -> Result<Document> {
    let mut r = ByteReader::new(r);
    let header = Header::read_from(&mut r, Revision::V2)?;
    let points = read_points(&mut r, header.point_count)?;

    let mut primitives = Vec::with_capacity(capacity_for(header.prim_count));
    for _ in 0..header.prim_count {
        primitives.push(Primitive::new(read_indices(&mut r)?));
    }
    tracing::trace!(count = header.prim_count, "read primitive records");

    Ok(Document {
        header,
        points,
        primitives,
    })
}

/// Decode a revision 2 buffer.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    read(bytes)
}

/// Decode the revision 2 file at `path`.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn read_file(path: impl AsRef<Path>) -> Result<Document> {
    read(BufReader::new(File::open(path.as_ref())?))
}
