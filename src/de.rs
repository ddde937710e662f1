//! Deserialization of MYGEO files.
//!
//! Each revision has its own decoder, and each decoder only accepts its own magic; a v3 file
//! handed to [v2::read] is a format error, not a best-effort parse.

use std::io::Read;

use crate::{
    reader::{capacity_for, ByteReader, MAX_PREALLOC},
    Header, Mesh, Position, Primitive, Result, Revision, Texcoord,
};

pub mod v2;
pub mod v3;

/// The decoded contents of a MYGEO file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: Header,
    pub points: Vec<Position>,
    pub primitives: Vec<Primitive>,
}

impl Document {
    /// The first point, if any.
    pub fn first_point(&self) -> Option<&Position> {
        self.points.first()
    }

    /// The first primitive, if any.
    pub fn first_primitive(&self) -> Option<&Primitive> {
        self.primitives.first()
    }
}

impl From<Document> for Mesh {
    /// Revision 2 flags are never read as UV bits, since v2 primitives carry no UVs.
    fn from(doc: Document) -> Self {
        let uv = match doc.header.revision() {
            Some(Revision::V3) => doc.header.flags.uv(),
            _ => None,
        };
        Self {
            points: doc.points,
            primitives: doc.primitives,
            uv,
            space: doc.header.space,
        }
    }
}

pub(crate) fn read_points<R: Read>(r: &mut ByteReader<R>, count: u32) -> Result<Vec<Position>> {
    let mut points = Vec::with_capacity(capacity_for(count));
    for _ in 0..count {
        let x = r.read_f32("point x")?;
        let y = r.read_f32("point y")?;
        let z = r.read_f32("point z")?;
        points.push(Position::new(x, y, z));
    }
    tracing::trace!(count, "read point block");
    Ok(points)
}

/// Read a corner count followed by that many point indices.
pub(crate) fn read_indices<R: Read>(r: &mut ByteReader<R>) -> Result<Vec<u32>> {
    let corners = r.read_u32("corner count")?;
    let mut indices = Vec::with_capacity(capacity_for(corners));
    for _ in 0..corners {
        indices.push(r.read_u32("point index")?);
    }
    Ok(indices)
}

pub(crate) fn read_uvs<R: Read>(r: &mut ByteReader<R>, count: usize) -> Result<Vec<Texcoord>> {
    let mut uvs = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let u = r.read_f32("uv u")?;
        let v = r.read_f32("uv v")?;
        uvs.push(Texcoord::new(u, v));
    }
    Ok(uvs)
}
