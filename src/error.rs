use thiserror::Error;

/// Result type alias for selection pipeline operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Rejection of an annotation identifier at construction time.
/// The offending input is kept for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("failed to extract numeric portion of ID from GO annotation '{0}'")]
    NoNumericGoId(String),

    #[error("EC number ({0}) in unrecognized format, expected N.N.N.N (where N can be 0-9 or a dash)")]
    MalformedEcNumber(String),
}

/// Errors raised by the transcript selection pipeline.
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("reservoir holds {available} transcripts but {needed} more are needed to reach the requested count")]
    InsufficientData { needed: usize, available: usize },
}
