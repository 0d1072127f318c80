use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use token_sessions::{ACCESS_COOKIE_NAME, SessionManager, TokenError, cookie_value};

use super::session::{AuthClaims, AuthRedirect};

/// Access-token gate that redirects unauthenticated requests to the
/// refresh endpoint, preserving the original path/query as a suffix.
///
/// Verified claims are stored in the request extensions as
/// [`AuthClaims<C>`] for downstream handlers.
pub async fn authenticate_redirect<C>(
    State(manager): State<Arc<SessionManager<C>>>,
    mut req: Request,
    next: Next,
) -> Response
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    match verified_claims(&manager, &req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!("Access token rejected: {err}");
            AuthRedirect::for_uri(req.uri()).into_response()
        }
    }
}

/// Access-token gate that answers a plain 401 instead of redirecting, for
/// API clients that drive their own re-authentication.
pub async fn authenticate_401<C>(
    State(manager): State<Arc<SessionManager<C>>>,
    mut req: Request,
    next: Next,
) -> Response
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    match verified_claims(&manager, &req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!("Access token rejected: {err}");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

fn verified_claims<C>(
    manager: &SessionManager<C>,
    req: &Request,
) -> Result<AuthClaims<C>, TokenError>
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let token = cookie_value(req.headers(), ACCESS_COOKIE_NAME.as_str())
        .ok_or_else(|| TokenError::Invalid("no access cookie presented".to_string()))?;
    manager.verify_access(token).map(AuthClaims::from)
}
