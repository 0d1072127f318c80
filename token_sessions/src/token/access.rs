use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::errors::TokenError;
use super::types::AccessClaims;

/// Sign `claims` as an HS256 token expiring `access_timeout` from now.
///
/// The claims are serialized to a JSON object whose `exp` member is
/// overwritten with the computed expiry, so a caller-supplied `exp` never
/// reaches the token.
pub fn sign_access_token<C: Serialize>(
    claims: &C,
    secret: &[u8],
    access_timeout: Duration,
) -> Result<String, TokenError> {
    let mut payload = match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(TokenError::ClaimsSerialization(
                "claims must serialize to a JSON object".to_string(),
            ));
        }
        Err(e) => return Err(TokenError::ClaimsSerialization(e.to_string())),
    };

    let expires_at = Utc::now() + access_timeout;
    payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));

    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify an HS256 token and split the injected expiry back out of the
/// claims.
pub fn verify_access_token<C: DeserializeOwned>(
    token: &str,
    secret: &[u8],
) -> Result<AccessClaims<C>, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<AccessClaims<C>>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}
