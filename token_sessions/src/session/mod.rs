mod config;
mod errors;
mod main;

pub use config::{ACCESS_COOKIE_NAME, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{SessionManager, cookie_value};
