use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{ConnectInfo, OriginalUri, Query, Request, State},
    response::{IntoResponse, Redirect, Response},
    routing::any,
};
use http::{HeaderMap, Uri, header::USER_AGENT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use token_sessions::{Device, SessionManager};

use super::config::{LOGOUT_REDIRECT, refresh_path};
use super::error::session_error_response;

/// Router serving the refresh and logout endpoints. Nest it at
/// [`AUTH_ROUTE_PREFIX`](crate::AUTH_ROUTE_PREFIX) so the session cookie's
/// path covers it.
pub fn session_router<C>(manager: Arc<SessionManager<C>>) -> Router
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/refresh", any(refresh::<C>))
        // A gate redirect from `/` appends only the slash, which the
        // wildcard below cannot match.
        .route("/refresh/", any(refresh::<C>))
        .route("/refresh/{*original}", any(refresh::<C>))
        .route("/logout", any(logout::<C>))
        .with_state(manager)
}

/// Rotate the session and send the client back to where the gate caught
/// it. The original path/query ride in as the suffix of the request path.
async fn refresh<C>(
    State(manager): State<Arc<SessionManager<C>>>,
    OriginalUri(uri): OriginalUri,
    req: Request,
) -> Response
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let device = device_for(&req);
    let mut cookies = HeaderMap::new();

    match manager.refresh(req.headers(), device, &mut cookies).await {
        Ok(()) => {
            let target = original_target(&uri);
            tracing::debug!("Session refreshed, redirecting to {target}");
            (cookies, Redirect::temporary(&target)).into_response()
        }
        Err(err) => {
            tracing::debug!("Refresh failed: {err}");
            (cookies, session_error_response(err)).into_response()
        }
    }
}

#[derive(Deserialize)]
struct RedirectQuery {
    redirect: Option<String>,
}

/// Close the session and redirect, honouring an optional `redirect` query
/// parameter.
async fn logout<C>(
    State(manager): State<Arc<SessionManager<C>>>,
    Query(query): Query<RedirectQuery>,
    headers: HeaderMap,
) -> Response
where
    C: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let mut cookies = HeaderMap::new();

    match manager.stop(&headers, &mut cookies).await {
        Ok(()) => {
            let target = query.redirect.unwrap_or_else(|| LOGOUT_REDIRECT.clone());
            tracing::debug!("Session stopped, redirecting to {target}");
            (cookies, Redirect::to(&target)).into_response()
        }
        Err(err) => {
            tracing::debug!("Logout failed: {err}");
            (cookies, session_error_response(err)).into_response()
        }
    }
}

/// Where a successful refresh sends the client: the original uri with the
/// refresh-endpoint prefix stripped, or `/` when nothing was appended.
fn original_target(uri: &Uri) -> String {
    let full = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    match full.strip_prefix(refresh_path().as_str()) {
        // Collapse extra leading slashes; "//host" in a Location header
        // is a protocol-relative external URL.
        Some(rest) if rest.starts_with('/') => format!("/{}", rest.trim_start_matches('/')),
        _ => "/".to_string(),
    }
}

fn device_for(req: &Request) -> Device {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Device::new(ip, user_agent)
}
