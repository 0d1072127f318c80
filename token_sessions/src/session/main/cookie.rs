use chrono::{DateTime, Duration, Utc};
use http::HeaderMap;
use http::header::{COOKIE, HOST, SET_COOKIE};

use crate::config::AUTH_ROUTE_PREFIX;
use crate::session::config::{ACCESS_COOKIE_NAME, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;

/// Look up a cookie's value in a request's `Cookie` header.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;

    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value),
            _ => None,
        }
    })
}

/// Issue the cookie pair for a freshly created session.
///
/// The session cookie is scoped to the auth route prefix and kept away from
/// scripts; the access cookie is host-wide and script-readable so clients
/// can inspect their own expiry.
pub(crate) fn issue_cookies(
    response: &mut HeaderMap,
    request: &HeaderMap,
    access_token: &str,
    refresh_token: &str,
    access_timeout: Duration,
    refresh_timeout: Duration,
) -> Result<(), SessionError> {
    let host = request_host(request);
    let now = Utc::now();

    append_cookie(
        response,
        SESSION_COOKIE_NAME.as_str(),
        refresh_token,
        host,
        AUTH_ROUTE_PREFIX.as_str(),
        true,
        now + refresh_timeout,
        refresh_timeout.num_seconds(),
    )?;
    append_cookie(
        response,
        ACCESS_COOKIE_NAME.as_str(),
        access_token,
        host,
        "/",
        false,
        now + access_timeout,
        access_timeout.num_seconds(),
    )
}

/// Expire both cookies: same names, paths and flags as [`issue_cookies`],
/// empty values, `Max-Age=-1` and an `Expires` in the past.
pub(crate) fn clear_cookies(
    response: &mut HeaderMap,
    request: &HeaderMap,
) -> Result<(), SessionError> {
    let host = request_host(request);
    let now = Utc::now();

    append_cookie(
        response,
        SESSION_COOKIE_NAME.as_str(),
        "",
        host,
        AUTH_ROUTE_PREFIX.as_str(),
        true,
        now,
        -1,
    )?;
    append_cookie(response, ACCESS_COOKIE_NAME.as_str(), "", host, "/", false, now, -1)
}

#[allow(clippy::too_many_arguments)]
fn append_cookie(
    response: &mut HeaderMap,
    name: &str,
    value: &str,
    host: Option<&str>,
    path: &str,
    http_only: bool,
    expires_at: DateTime<Utc>,
    max_age: i64,
) -> Result<(), SessionError> {
    let mut cookie = format!("{name}={value}; SameSite=Lax");
    if host != Some("localhost") {
        cookie.push_str("; Secure");
    }
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    if let Some(host) = host {
        cookie.push_str(&format!("; Domain={host}"));
    }
    cookie.push_str(&format!(
        "; Path={path}; Max-Age={max_age}; Expires={}",
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    ));

    response.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}

/// Request host with any port stripped, for the cookie `Domain` attribute
/// and the localhost `Secure` exception.
fn request_host(request: &HeaderMap) -> Option<&str> {
    let host = request.get(HOST)?.to_str().ok()?;
    Some(bare_host(host))
}

fn bare_host(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
