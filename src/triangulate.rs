//! Fan triangulation of [Mesh] primitives, for consumers that can only draw triangles.

use crate::{Error, Mesh, Position, Primitive, Result, Texcoord};

/// Corner positions of a fan triangle within its primitive: `(0, j, j + 1)`.
fn fan(prim: &Primitive) -> impl Iterator<Item = [usize; 3]> + '_ {
    (1..prim.len().saturating_sub(1)).map(|j| [0, j, j + 1])
}

/// Non-indexed triangle data: three entries per triangle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Unindexed {
    pub positions: Vec<Position>,
    /// Present iff the source mesh carried UVs.
    pub uvs: Option<Vec<Texcoord>>,
}

impl Unindexed {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

impl Mesh {
    /// Point-index triangles covering every primitive, fanned from each primitive's first corner.
    ///
    /// Primitives with fewer than three corners produce nothing.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.primitives.iter().flat_map(|prim| {
            fan(prim).map(|[a, b, c]| [prim.indices[a], prim.indices[b], prim.indices[c]])
        })
    }

    /// Expand every fan triangle into its own three corners, copying positions (and UVs).
    ///
    /// # Errors
    ///
    /// * [Error::IndexOutOfRange] if a corner references a point that doesn't exist
    pub fn unindexed(&self) -> Result<Unindexed> {
        let mut out = Unindexed {
            positions: Vec::new(),
            uvs: self.has_uvs().then(Vec::new),
        };
        for (p_idx, prim) in self.primitives.iter().enumerate() {
            for tri in fan(prim) {
                for corner in tri {
                    let index = prim.indices[corner];
                    let pos = self.points.get(index as usize).ok_or_else(|| {
                        Error::IndexOutOfRange {
                            primitive: p_idx,
                            corner,
                            index,
                            point_count: self.points.len(),
                        }
                    })?;
                    out.positions.push(*pos);
                    if let Some(uvs) = out.uvs.as_mut() {
                        let uv = prim.uvs.get(corner).ok_or_else(|| Error::UvCountMismatch {
                            primitive: p_idx,
                            corners: prim.len(),
                            uvs: prim.uvs.len(),
                        })?;
                        uvs.push(*uv);
                    }
                }
            }
        }
        Ok(out)
    }
}
