use thiserror::Error;

/// Errors raised by the OT algebra and its consumers.
///
/// Every variant is a local integration error: the caller handed the engine
/// operations or text that do not belong together. None of them is transient.
#[derive(Error, Debug)]
pub enum OtError {
    #[error("Text length {actual} does not match operation base length {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Cannot transform operations with different base lengths ({left} vs {right})")]
    BaseLengthMismatch { left: usize, right: usize },

    #[error("Cannot compose: first target length {first_target} != second base length {second_base}")]
    ChainLengthMismatch {
        first_target: usize,
        second_base: usize,
    },

    #[error("Operation consumes {consumed} characters of a {base_len}-character base")]
    Overrun { base_len: usize, consumed: usize },

    #[error("Invalid operation payload: {0}")]
    InvalidPayload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Revision {requested} is ahead of current revision {current}")]
    UnknownRevision { requested: u64, current: u64 },

    #[error("Revision {requested} was pruned (oldest retained: {oldest})")]
    RevisionPruned { requested: u64, oldest: u64 },
}

pub type Result<T> = std::result::Result<T, OtError>;
