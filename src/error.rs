use std::io;

use crate::header::Revision;

/// Errors produced while extracting, encoding, or decoding MYGEO data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source node not found: {0}")]
    NodeNotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Not a {expected} file (got b\"{}\")", .found.escape_ascii())]
    Format { expected: Revision, found: Vec<u8> },
    #[error("input truncated while reading {field} at byte offset {offset}")]
    Truncated { field: &'static str, offset: u64 },
    #[error("{what} count {count} does not fit in a 32-bit field")]
    CountOverflow { what: &'static str, count: usize },
    #[error("primitive {primitive}, corner {corner}: point index {index} is out of range for {point_count} points")]
    IndexOutOfRange {
        primitive: usize,
        corner: usize,
        index: u32,
        point_count: usize,
    },
    #[error("primitive {primitive} has {corners} corners but {uvs} UV pairs")]
    UvCountMismatch {
        primitive: usize,
        corners: usize,
        uvs: usize,
    },
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
