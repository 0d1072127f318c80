use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

use super::errors::StoreError;
use super::types::{RedisSessionStore, Session, SessionStore};

const KEY_PREFIX: &str = "session";

impl RedisSessionStore {
    /// Open a client against `url` and verify the server is reachable
    /// before handing the store out.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        client.get_multiplexed_async_connection().await?;
        Ok(Self { client })
    }

    fn make_key(token: &str) -> String {
        format!("{KEY_PREFIX}:{token}")
    }
}

#[async_trait]
impl<C> SessionStore<C> for RedisSessionStore
where
    C: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn create(&self, session: Session<C>) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(&session.token);
        let value = serde_json::to_string(&session)?;
        // Expire the key when the session passes its absolute deadline.
        let ttl = (session.expired - Utc::now()).num_seconds().max(1);

        let _: () = conn.set(&key, value).await?;
        let _: () = conn.expire(&key, ttl).await?;
        Ok(())
    }

    async fn read(&self, token: &str) -> Result<Session<C>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(token);
        let value: Option<String> = conn.get(&key).await?;
        match value {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(token);
        let _: () = conn.del(&key).await?;
        Ok(())
    }
}
