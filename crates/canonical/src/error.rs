use thiserror::Error;

/// Errors that can occur while producing canonical output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("failed to serialize converter envelope: {0}")]
    Serialize(String),
}
