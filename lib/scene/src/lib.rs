//! An in-memory scene of named nodes carrying polygon geometry, usable as a geometry source for
//! [mygeo::source::export].

#[cfg(feature = "deserialize")]
pub mod de;

mod data;
mod error;
pub use data::*;
pub use error::*;
