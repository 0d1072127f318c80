use std::env;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use super::errors::StoreError;
use super::types::{MemorySessionStore, RedisSessionStore, SessionStore};

/// Build a session store from the environment.
///
/// `SESSION_STORE_TYPE` selects the backend (`memory`, the default, or
/// `redis`); the redis backend additionally requires `SESSION_STORE_URL`.
pub async fn session_store_from_env<C>() -> Result<Arc<dyn SessionStore<C>>, StoreError>
where
    C: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let store_type = env::var("SESSION_STORE_TYPE").unwrap_or_else(|_| "memory".to_string());

    match store_type.as_str() {
        "memory" => {
            tracing::info!("Using in-memory session store");
            Ok(Arc::new(MemorySessionStore::new()))
        }
        "redis" => {
            let url = env::var("SESSION_STORE_URL").map_err(|_| {
                StoreError::Config(
                    "SESSION_STORE_URL must be set when SESSION_STORE_TYPE is redis".to_string(),
                )
            })?;
            tracing::info!("Using redis session store");
            Ok(Arc::new(RedisSessionStore::connect(&url).await?))
        }
        other => Err(StoreError::Config(format!(
            "Unsupported session store type: {other}. Supported types are 'memory' and 'redis'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_defaults_to_memory_store() {
        unsafe { env::remove_var("SESSION_STORE_TYPE") };

        let store = session_store_from_env::<String>().await;
        assert!(store.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_unsupported_store_type() {
        unsafe { env::set_var("SESSION_STORE_TYPE", "sqlite") };

        // The trait object on the Ok side has no Debug impl, so take the
        // error out through Option instead of unwrap_err.
        let err = session_store_from_env::<String>().await.err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));

        unsafe { env::remove_var("SESSION_STORE_TYPE") };
    }

    #[tokio::test]
    #[serial]
    async fn test_redis_requires_url() {
        unsafe { env::set_var("SESSION_STORE_TYPE", "redis") };
        unsafe { env::remove_var("SESSION_STORE_URL") };

        let err = session_store_from_env::<String>().await.err().unwrap();
        assert_eq!(
            err,
            StoreError::Config(
                "SESSION_STORE_URL must be set when SESSION_STORE_TYPE is redis".to_string()
            )
        );

        unsafe { env::remove_var("SESSION_STORE_TYPE") };
    }
}
