use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub(crate) enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Generate `len` random bytes and encode them as unpadded base64url.
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_random_string_length() {
        // 32 bytes encode to 43 base64url characters without padding
        let s = gen_random_string(32).unwrap();
        assert_eq!(s.len(), 43);
    }

    #[test]
    fn test_gen_random_string_unique() {
        let a = gen_random_string(32).unwrap();
        let b = gen_random_string(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_gen_random_string_is_url_safe() {
        let s = gen_random_string(64).unwrap();
        assert!(
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
