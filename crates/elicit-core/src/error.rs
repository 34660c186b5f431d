//! Error types for the Elicit analysis system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("gesture must contain at least one pose")]
    EmptyGesture,

    #[error("pose must contain at least one joint")]
    EmptyPose,

    #[error("pose count mismatch: {left} vs. {right} poses")]
    PoseCountMismatch { left: usize, right: usize },

    #[error("joint count mismatch: expected {expected}, got {actual}")]
    JointCountMismatch { expected: usize, actual: usize },

    #[error("tolerance {0} outside the accepted range (0, 1]")]
    ToleranceOutOfRange(f64),

    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("unknown gesture category: {0}")]
    UnknownCategory(String),

    #[error("unknown hand side: {0}")]
    UnknownHandSide(String),

    #[error("cannot aggregate an empty score list")]
    EmptyAggregation,

    #[error("no comparable subject pairs in dissimilarity matrix")]
    NoComparablePairs,

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
