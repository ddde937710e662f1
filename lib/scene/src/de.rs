//! Construction of [Scenes](crate::Scene) from various storage formats.

#[cfg(feature = "de_obj")]
pub mod obj;
