use std::sync::Arc;

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{Uri, request::Parts};
use serde::{Serialize, de::DeserializeOwned};

use token_sessions::{ACCESS_COOKIE_NAME, AccessClaims, SessionManager};

use super::config::refresh_path;

/// Rejection for unauthenticated requests: a temporary redirect to the
/// refresh endpoint carrying the original path/query as a suffix, so a
/// successful refresh can send the client straight back.
pub struct AuthRedirect {
    target: String,
}

impl AuthRedirect {
    pub(crate) fn for_uri(uri: &Uri) -> Self {
        Self {
            target: refresh_target(uri),
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        tracing::debug!("Redirecting to {}", self.target);
        Redirect::temporary(&self.target).into_response()
    }
}

/// Refresh-endpoint target for a request uri: the refresh path with the
/// original path and query appended verbatim.
pub(crate) fn refresh_target(uri: &Uri) -> String {
    let original = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    format!("{}{original}", refresh_path())
}

/// Verified access-token claims, available as an Axum extractor.
///
/// When used as an extractor it reads the access cookie, verifies it
/// against the [`SessionManager`] found in the router state, and rejects
/// with [`AuthRedirect`] when the cookie is missing or fails verification.
/// Behind [`authenticate_redirect`](crate::authenticate_redirect) or
/// [`authenticate_401`](crate::authenticate_401) the claims the middleware
/// already verified are reused instead.
///
/// # Example
///
/// ```no_run
/// use serde::{Deserialize, Serialize};
/// use token_sessions_axum::AuthClaims;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Profile {
///     #[serde(rename = "Name")]
///     name: String,
/// }
///
/// async fn protected_handler(user: AuthClaims<Profile>) -> String {
///     format!("Hello, {}!", user.claims.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthClaims<C> {
    /// Application-defined claims recovered from the token.
    pub claims: C,
    /// Token expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl<C> From<AccessClaims<C>> for AuthClaims<C> {
    fn from(verified: AccessClaims<C>) -> Self {
        Self {
            exp: verified.exp,
            claims: verified.claims,
        }
    }
}

impl<C, S> FromRequestParts<S> for AuthClaims<C>
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    S: Send + Sync,
    Arc<SessionManager<C>>: FromRef<S>,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Middleware may already have verified this request
        if let Some(claims) = parts.extensions.get::<AuthClaims<C>>() {
            return Ok(claims.clone());
        }

        let target = refresh_target(&parts.uri);

        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("Failed to extract cookies");
            AuthRedirect {
                target: target.clone(),
            }
        })?;

        let token = cookies.get(ACCESS_COOKIE_NAME.as_str()).ok_or_else(|| {
            tracing::debug!("No access cookie presented");
            AuthRedirect {
                target: target.clone(),
            }
        })?;

        let manager = <Arc<SessionManager<C>> as FromRef<S>>::from_ref(state);
        let verified = manager.verify_access(token).map_err(|err| {
            tracing::debug!("Access token rejected: {err}");
            AuthRedirect { target }
        })?;

        Ok(AuthClaims::from(verified))
    }
}

impl<C, S> OptionalFromRequestParts<S> for AuthClaims<C>
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    S: Send + Sync,
    Arc<SessionManager<C>>: FromRef<S>,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, _> =
            <AuthClaims<C> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
