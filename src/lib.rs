//! Reader and writer for MYGEO, a small little-endian binary format for polygon meshes: point
//! positions, per-primitive corner lists, and optional per-corner UVs.
//!
//! # Revisions
//!
//! * [Revision::V3] is written by [ser::v3] and read by [de::v3].
//! * [Revision::V2] (no UV blocks) is read by [de::v2].
//!
//! The revisions are separate formats with distinct magic; neither decoder accepts the other's
//! files.
//!
//! # Example
//!
//! ```
//! use mygeo::{Mesh, Position, Primitive};
//!
//! let tri = Mesh::new(
//!     vec![
//!         Position::new(0.0, 0.0, 0.0),
//!         Position::new(1.0, 0.0, 0.0),
//!         Position::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![Primitive::new(vec![0, 1, 2])],
//! );
//! let bytes = mygeo::ser::v3::encode(&tri).unwrap();
//! assert_eq!(bytes.len(), 76);
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod de;
mod error;
mod header;
mod mesh;
pub mod reader;
pub mod ser;
pub mod source;
mod triangulate;

pub use error::*;
pub use header::*;
pub use mesh::*;
pub use triangulate::*;
