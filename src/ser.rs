//! Serialization of [Meshes](crate::Mesh) to MYGEO files.
//!
//! Only the newest revision is written; see [v3].

pub mod v3;
