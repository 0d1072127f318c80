//! Central configuration for the token-sessions crate.
//!
//! Everything here is resolved from the environment once, on first use.

use std::sync::LazyLock;

/// Mount prefix for the refresh/logout endpoints, and the `Path` of the
/// session cookie. The two must agree or the browser will withhold the
/// refresh token from the refresh endpoint.
///
/// Default: "/auth"
pub static AUTH_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(auth_route_prefix);

fn auth_route_prefix() -> String {
    std::env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string())
}
