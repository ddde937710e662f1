//! The fixed 24-byte header shared by every MYGEO revision.
//!
//! ```text
//! offset  size  field
//! 0       8     magic ("MYGEOv2\n" / "MYGEOv3\n")
//! 8       4     pointCount (u32 LE)
//! 12      4     primCount  (u32 LE)
//! 16      4     flags      (u32 LE)
//! 20      1     space      (0 = object, 1 = world)
//! 21      3     reserved   (zero)
//! ```

use std::{
    fmt::Display,
    io::{Read, Write},
};

use static_assertions::const_assert_eq;

use crate::{reader::ByteReader, Error, Flags, Result, Space};

pub const MAGIC_LEN: usize = 8;

/// Size in bytes of the encoded header.
pub const HEADER_LEN: usize = MAGIC_LEN
    + std::mem::size_of::<u32>() * 3
    + std::mem::size_of::<u8>()
    + RESERVED.len();

const RESERVED: [u8; 3] = [0; 3];

const_assert_eq!(HEADER_LEN, 24);

/// A revision of the MYGEO format. Revisions are not interchangeable: each has its own magic
/// and its own primitive record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// Points and primitive indices only.
    V2,
    /// Adds optional per-primitive UV blocks, enabled by [Flags::UV_PRESENT].
    V3,
}

impl Revision {
    pub const fn magic(self) -> &'static [u8; MAGIC_LEN] {
        match self {
            Revision::V2 => b"MYGEOv2\n",
            Revision::V3 => b"MYGEOv3\n",
        }
    }

    pub const fn number(self) -> u32 {
        match self {
            Revision::V2 => 2,
            Revision::V3 => 3,
        }
    }
}

impl Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MYGEO v{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    pub magic: [u8; MAGIC_LEN],
    pub point_count: u32,
    pub prim_count: u32,
    pub flags: Flags,
    pub space: Space,
}

impl Header {
    pub fn new(
        revision: Revision,
        point_count: u32,
        prim_count: u32,
        flags: Flags,
        space: Space,
    ) -> Self {
        Self {
            magic: *revision.magic(),
            point_count,
            prim_count,
            flags,
            space,
        }
    }

    /// The revision named by this header's magic.
    pub fn revision(&self) -> Option<Revision> {
        [Revision::V2, Revision::V3]
            .into_iter()
            .find(|rev| rev.magic() == &self.magic)
    }

    pub fn write_to(&self, w: &mut impl Write) -> Result<()> {
        w.write_all(&self.magic)?;
        w.write_all(&self.point_count.to_le_bytes())?;
        w.write_all(&self.prim_count.to_le_bytes())?;
        w.write_all(&self.flags.bits().to_le_bytes())?;
        w.write_all(&[self.space.to_byte()])?;
        w.write_all(&RESERVED)?;
        Ok(())
    }

    /// Read a header, rejecting any magic other than `revision`'s.
    ///
    /// The reserved bytes are skipped without being checked.
    pub fn read_from<R: Read>(r: &mut ByteReader<R>, revision: Revision) -> Result<Self> {
        let found = r.read_up_to(MAGIC_LEN)?;
        if found.as_slice() != revision.magic() {
            return Err(Error::Format {
                expected: revision,
                found,
            });
        }
        let point_count = r.read_u32("point count")?;
        let prim_count = r.read_u32("primitive count")?;
        let flags = Flags::from_bits(r.read_u32("flags")?);
        let space = Space::from_byte(r.read_u8("space")?);
        r.skip::<3>("reserved header bytes")?;
        let header = Self {
            magic: *revision.magic(),
            point_count,
            prim_count,
            flags,
            space,
        };
        tracing::debug!(
            %revision,
            point_count,
            prim_count,
            flags = header.flags.bits(),
            %space,
            "read header"
        );
        Ok(header)
    }
}
