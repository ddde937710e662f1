use mygeo::source::AttribClass;

/// Errors related to building or loading a [Scene](crate::Scene).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node names must be non-empty and must not contain '/': {0:?}")]
    InvalidName(String),
    #[error("a node already exists at {0}")]
    DuplicatePath(String),
    #[error("no node at index {0}")]
    InvalidNode(usize),
    #[error("no transform at index {0}")]
    InvalidTransform(usize),
    #[error("primitive corner references point {index}, but the geometry has {point_count} points")]
    PointOutOfRange { index: u32, point_count: usize },
    #[error("{class:?} attribute {name:?} holds {actual} values; expected {expected}")]
    AttributeLength {
        class: AttribClass,
        name: String,
        expected: usize,
        actual: usize,
    },
    #[cfg(feature = "de_obj")]
    #[error(transparent)]
    Obj(#[from] tobj::LoadError),
}
