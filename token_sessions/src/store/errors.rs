use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// No record exists under the presented refresh-token id.
    #[error("Session not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
