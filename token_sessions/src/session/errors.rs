use thiserror::Error;

use crate::store::StoreError;
use crate::token::TokenError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// No usable session credential: missing cookie or a session past its
    /// absolute deadline.
    #[error("Unauthorized")]
    Unauthorized,

    /// Access-token signing or verification failure.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Store failure propagated from a create or read.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_conversion() {
        let err: SessionError = TokenError::Expired.into();
        assert!(matches!(err, SessionError::Token(TokenError::Expired)));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: SessionError = StoreError::NotFound.into();
        assert!(matches!(err, SessionError::Store(StoreError::NotFound)));
        assert_eq!(err.to_string(), "Store error: Session not found");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionError>();
    }
}
