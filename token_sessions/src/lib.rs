//! Dual-token cookie session management.
//!
//! A short-lived HS256 access token travels in one cookie and is verified
//! statelessly on every request; a long-lived opaque refresh token travels
//! in a second, tightly scoped cookie and references a server-side session
//! record. [`SessionManager`] drives the lifecycle: `start` on login,
//! `refresh` to rotate both tokens, `stop` on logout.
//!
//! The crate is framework-agnostic: operations read request headers and
//! write `Set-Cookie` headers into a caller-supplied response header map.
//! See the `token-sessions-axum` crate for ready-made axum wiring.

mod config;
mod session;
mod store;
mod token;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::AUTH_ROUTE_PREFIX;
pub use session::{
    ACCESS_COOKIE_NAME, SESSION_COOKIE_NAME, SessionError, SessionManager, cookie_value,
};
pub use store::{
    Device, MemorySessionStore, RedisSessionStore, Session, SessionStore, StoreError,
    session_store_from_env,
};
pub use token::{AccessClaims, TokenError, sign_access_token, verify_access_token};
