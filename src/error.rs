use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// The spreadsheet collaborator could not hand over a table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("spreadsheet could not be decoded: {0}")]
    Decode(String),
    #[error("spreadsheet io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by a write-back port when the roster UI lacks the expected control.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteBackError {
    #[error("{field} control unavailable: {reason}")]
    Unavailable { field: &'static str, reason: String },
    #[error("commit failed: {0}")]
    Commit(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("source read failure: {0}")]
    SourceRead(#[from] SourceError),
    #[error("final commit failed: {0}")]
    Commit(WriteBackError),
}
