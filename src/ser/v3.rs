//! Writer for MYGEO revision 3.
//!
//! # Layout
//!
//! * [Header](crate::Header) with magic `"MYGEOv3\n"`
//! * `pointCount` × (`f32` x, `f32` y, `f32` z)
//! * `primCount` × primitive record:
//!   * `cornerCount`: `u32`
//!   * `cornerCount` × point index: `u32`
//!   * if [UV_PRESENT](crate::Flags::UV_PRESENT): `cornerCount` × (`f32` u, `f32` v)
//!
//! UVs are interleaved per primitive, not stored as one trailing block. Everything is
//! little-endian.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Error, Header, Mesh, Result, Revision};

fn count_u32(what: &'static str, count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::CountOverflow { what, count })
}

/// The header that [write] emits for `mesh`.
pub fn header_for(mesh: &Mesh) -> Result<Header> {
    Ok(Header::new(
        Revision::V3,
        count_u32("point", mesh.points.len())?,
        count_u32("primitive", mesh.primitives.len())?,
        mesh.flags(),
        mesh.space,
    ))
}

/// Write `mesh` to `w`.
///
/// Point indices are written as given; nothing checks that they reference existing points.
pub fn write(mesh: &Mesh, w: &mut impl Write) -> Result<()> {
    let header = header_for(mesh)?;
    header.write_to(w)?;

    for p in &mesh.points {
        w.write_all(&p.x.to_le_bytes())?;
        w.write_all(&p.y.to_le_bytes())?;
        w.write_all(&p.z.to_le_bytes())?;
    }
    tracing::trace!(count = mesh.points.len(), "wrote point block");

    let with_uvs = mesh.has_uvs();
    for (p_idx, prim) in mesh.primitives.iter().enumerate() {
        w.write_all(&count_u32("corner", prim.len())?.to_le_bytes())?;
        for idx in &prim.indices {
            w.write_all(&idx.to_le_bytes())?;
        }
        if with_uvs {
            if prim.uvs.len() != prim.indices.len() {
                return Err(Error::UvCountMismatch {
                    primitive: p_idx,
                    corners: prim.indices.len(),
                    uvs: prim.uvs.len(),
                });
            }
            for uv in &prim.uvs {
                w.write_all(&uv.x.to_le_bytes())?;
                w.write_all(&uv.y.to_le_bytes())?;
            }
        }
    }
    tracing::trace!(
        count = mesh.primitives.len(),
        with_uvs,
        "wrote primitive blocks"
    );
    Ok(())
}

/// Encode `mesh` into a new buffer.
pub fn encode(mesh: &Mesh) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(mesh, &mut buf)?;
    Ok(buf)
}

/// Write `mesh` to a file at `path`, creating its parent directories if needed, and return the
/// path written.
///
/// A failure part-way through may leave a truncated file behind.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn write_file(mesh: &Mesh, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_argument("destination path is empty"));
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            tracing::debug!(?dir, "creating destination directory");
            fs::create_dir_all(dir)?;
        }
    }

    let mut w = BufWriter::new(File::create(path)?);
    write(mesh, &mut w)?;
    // flush explicitly; BufWriter's drop swallows errors
    w.flush()?;
    tracing::debug!(
        points = mesh.points.len(),
        primitives = mesh.primitives.len(),
        "wrote MYGEO v3 file"
    );
    Ok(path.to_path_buf())
}
