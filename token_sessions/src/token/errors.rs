use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    /// The application claims could not be turned into a JSON object.
    #[error("Claims serialization error: {0}")]
    ClaimsSerialization(String),

    #[error("Signing error: {0}")]
    Signing(String),

    /// The token's `exp` is in the past.
    #[error("Token expired")]
    Expired,

    /// Malformed token, bad signature, or claims that fail validation.
    #[error("Invalid token: {0}")]
    Invalid(String),
}
