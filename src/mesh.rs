//! Format-independent mesh description shared by every codec revision.

use std::{fmt::Display, str::FromStr};

use nalgebra::{Point2, Point3};

use crate::{Error, Result};

/// A point position. Stored on disk as three little-endian `f32`s.
pub type Position = Point3<f32>;

/// A UV pair. Stored on disk as two little-endian `f32`s.
pub type Texcoord = Point2<f32>;

/// The coordinate frame in which point positions are expressed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    /// The node's local frame.
    #[default]
    Object,
    /// The node's transform has been baked into the positions.
    World,
}

impl Space {
    /// Interpret a header space byte. Only `1` means world space.
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        if byte == 1 {
            Self::World
        } else {
            Self::Object
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Object => 0,
            Self::World => 1,
        }
    }
}

impl Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Space::Object => f.write_str("object"),
            Space::World => f.write_str("world"),
        }
    }
}

impl FromStr for Space {
    type Err = Error;

    /// Parse `"world"` or `"object"`, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("world") {
            Ok(Self::World)
        } else if s.eq_ignore_ascii_case("object") {
            Ok(Self::Object)
        } else {
            Err(Error::invalid_argument(format!(
                "unknown coordinate space {s:?}; expected \"world\" or \"object\""
            )))
        }
    }
}

/// Where a mesh's UVs were sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UvBinding {
    /// One value per corner; corners sharing a point may differ.
    PerCorner,
    /// One value per point, repeated for every corner referencing it.
    PerPoint,
}

/// The header flags bitfield. Each set bit enables an optional data block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Self = Self(0);
    pub const UV_PRESENT: Self = Self(1 << 0);
    pub const UV_IS_PER_CORNER: Self = Self(1 << 1);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The flags describing a mesh with the given UV source.
    pub const fn for_uv(uv: Option<UvBinding>) -> Self {
        match uv {
            None => Self::NONE,
            Some(UvBinding::PerPoint) => Self::UV_PRESENT,
            Some(UvBinding::PerCorner) => Self(Self::UV_PRESENT.0 | Self::UV_IS_PER_CORNER.0),
        }
    }

    /// The UV source described by these flags, ignoring unknown bits.
    pub const fn uv(self) -> Option<UvBinding> {
        if !self.contains(Self::UV_PRESENT) {
            None
        } else if self.contains(Self::UV_IS_PER_CORNER) {
            Some(UvBinding::PerCorner)
        } else {
            Some(UvBinding::PerPoint)
        }
    }
}

impl std::ops::BitOr for Flags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// A polygon: an ordered list of corners, each referencing a point.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Primitive {
    /// Point index of each corner, in winding order.
    pub indices: Vec<u32>,
    /// UV of each corner. Empty unless the owning mesh carries UVs.
    pub uvs: Vec<Texcoord>,
}

impl Primitive {
    pub fn new(indices: Vec<u32>) -> Self {
        Self {
            indices,
            uvs: Vec::new(),
        }
    }

    pub fn with_uvs(indices: Vec<u32>, uvs: Vec<Texcoord>) -> Self {
        Self { indices, uvs }
    }

    /// The number of corners of this primitive.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A fully resolved polygon mesh, ready to be written or handed to a consumer.
///
/// Point indices are not checked on construction; see [Mesh::validate].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    pub points: Vec<Position>,
    pub primitives: Vec<Primitive>,
    /// `Some` iff every primitive carries one UV per corner.
    pub uv: Option<UvBinding>,
    pub space: Space,
}

impl Mesh {
    pub fn new(points: Vec<Position>, primitives: Vec<Primitive>) -> Self {
        Self {
            points,
            primitives,
            uv: None,
            space: Space::Object,
        }
    }

    #[inline]
    pub fn has_uvs(&self) -> bool {
        self.uv.is_some()
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::for_uv(self.uv)
    }

    /// Total number of corners across all primitives.
    pub fn corner_count(&self) -> usize {
        self.primitives.iter().map(Primitive::len).sum()
    }

    /// Check that every corner references an existing point and, if the mesh carries UVs, that
    /// each primitive has exactly one UV per corner.
    ///
    /// The codecs never call this; it exists for consumers that want a strict mode.
    pub fn validate(&self) -> Result<()> {
        let point_count = self.points.len();
        for (p_idx, prim) in self.primitives.iter().enumerate() {
            if let Some((corner, &index)) = prim
                .indices
                .iter()
                .enumerate()
                .find(|&(_, &i)| i as usize >= point_count)
            {
                return Err(Error::IndexOutOfRange {
                    primitive: p_idx,
                    corner,
                    index,
                    point_count,
                });
            }
            if self.has_uvs() && prim.uvs.len() != prim.indices.len() {
                return Err(Error::UvCountMismatch {
                    primitive: p_idx,
                    corners: prim.indices.len(),
                    uvs: prim.uvs.len(),
                });
            }
        }
        Ok(())
    }
}
