use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbsenceError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed batch file: {reason}")]
    MalformedBatch { reason: String },

    #[error("Profile index {index} out of range (book holds {len})")]
    ProfileNotFound { index: usize, len: usize },

    #[error("Export failed: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AbsenceResult<T> = Result<T, AbsenceError>;
