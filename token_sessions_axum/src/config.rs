//! Central configuration for the token-sessions-axum crate.

use std::sync::LazyLock;

use token_sessions::AUTH_ROUTE_PREFIX;

/// Where `/logout` sends the client once the cookies are cleared, unless
/// the request carries an explicit `redirect` query parameter.
///
/// Default: "/"
pub static LOGOUT_REDIRECT: LazyLock<String> = LazyLock::new(logout_redirect);

fn logout_redirect() -> String {
    std::env::var("LOGOUT_REDIRECT").unwrap_or_else(|_| "/".to_string())
}

/// Full path of the refresh endpoint, mounted under the auth route prefix.
pub(crate) fn refresh_path() -> String {
    format!("{}/refresh", AUTH_ROUTE_PREFIX.as_str())
}
