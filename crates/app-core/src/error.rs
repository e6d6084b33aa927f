use thiserror::Error;

/// Reasons a raw landmark set cannot become a [`crate::HandFrame`].
///
/// These never leave the per-frame update: the pipeline treats a malformed
/// frame exactly like a frame without a hand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Scene setup failures. Only returned while building the catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene has no draggable objects")]
    EmptyCatalog,
    #[error("object id {0} appears more than once")]
    DuplicateObject(usize),
    #[error("node {0} has a non-positive size")]
    InvalidSize(String),
}
