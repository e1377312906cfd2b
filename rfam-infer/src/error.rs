use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferError {
    #[error("Unknown RNA type: {0}")]
    UnknownRnaType(String),
    #[error("Invalid name pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid manual config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
