mod access;
mod errors;
mod types;

pub use access::{sign_access_token, verify_access_token};
pub use errors::TokenError;
pub use types::AccessClaims;
