use serde::Deserialize;

/// Claims recovered from a verified access token: the application's own
/// claims plus the expiry the signer injected.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims<C> {
    /// Expiry as seconds since the Unix epoch. Always set by the signer,
    /// never by the caller.
    pub exp: i64,

    /// Application-defined identity claims.
    #[serde(flatten)]
    pub claims: C,
}
