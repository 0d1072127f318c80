//! Axum wiring for the `token-sessions` crate.
//!
//! Provides the request-time gate in two flavors, middleware
//! ([`authenticate_redirect`], [`authenticate_401`]) and an extractor
//! ([`AuthClaims`]), plus [`session_router`], which serves the refresh and
//! logout endpoints under [`AUTH_ROUTE_PREFIX`].

mod config;
mod error;
mod middleware;
mod router;
mod session;

pub use config::LOGOUT_REDIRECT;
pub use middleware::{authenticate_401, authenticate_redirect};
pub use router::session_router;
pub use session::{AuthClaims, AuthRedirect};

pub use token_sessions::AUTH_ROUTE_PREFIX;
