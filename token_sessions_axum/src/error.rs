use axum::response::{IntoResponse, Response};
use http::StatusCode;

use token_sessions::{SessionError, StoreError};

/// Map a session operation failure onto the response the client sees.
///
/// A missing credential and an unknown refresh id both mean the client
/// must authenticate again (401); everything else is a server-side fault.
pub(crate) fn session_error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::Unauthorized => StatusCode::UNAUTHORIZED,
        SessionError::Store(StoreError::NotFound) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_sessions::TokenError;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = session_error_response(SessionError::Unauthorized);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unknown_session_maps_to_401() {
        let response = session_error_response(SessionError::Store(StoreError::NotFound));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_backend_failure_maps_to_500() {
        let response =
            session_error_response(SessionError::Store(StoreError::Backend("down".to_string())));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_signing_failure_maps_to_500() {
        let response =
            session_error_response(SessionError::Token(TokenError::Signing("bad".to_string())));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
