/// Encoding and storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("base64 decoding failed: {0}")]
    Decoding(#[from] base64::DecodeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid share URL: {0}")]
    InvalidUrl(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}
