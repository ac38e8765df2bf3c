use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Registry invariant violated: a pair with neither a builtin nor an override.
    #[error("Entry has neither a builtin nor an override: {0}")]
    MissingEntry(String),

    #[error("Malformed {kind} override table: {reason}")]
    MalformedOverrideTable { kind: String, reason: String },

    #[error("Override document not found: {0}")]
    DocumentNotFound(String),

    #[error("Override document already exists: {0}")]
    DocumentExists(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
