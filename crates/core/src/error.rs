use std::io;

/// Errors that can occur while resolving provisioning specs and assembling
/// launch descriptors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed spec: {0}")]
    MalformedSpec(String),

    #[error("Unsupported scheme '{scheme}' (known schemes: {known})")]
    UnsupportedScheme { scheme: String, known: String },

    #[error("Scan failure: {0}")]
    ScanFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for modrun operations
pub type Result<T> = std::result::Result<T, Error>;
