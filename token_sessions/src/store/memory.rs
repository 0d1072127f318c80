use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::errors::StoreError;
use super::types::{MemorySessionStore, Session, SessionStore};

impl<C> MemorySessionStore<C> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<C> Default for MemorySessionStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C> SessionStore<C> for MemorySessionStore<C>
where
    C: Clone + Send + Sync + 'static,
{
    async fn create(&self, session: Session<C>) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn read(&self, token: &str) -> Result<Session<C>, StoreError> {
        self.entries
            .lock()
            .await
            .get(token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::Device;
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_session(token: &str) -> Session<String> {
        let now = Utc::now();
        Session {
            token: token.to_string(),
            claims: "claims".to_string(),
            device: Device::new("127.0.0.1", "tests"),
            created: now,
            expired: now + Duration::minutes(10),
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let store = MemorySessionStore::new();

        store.create(sample_session("t1")).await.unwrap();
        let session = store.read("t1").await.unwrap();

        assert_eq!(session.token, "t1");
        assert_eq!(session.claims, "claims");
    }

    #[tokio::test]
    async fn test_read_unknown_token() {
        let store: MemorySessionStore<String> = MemorySessionStore::new();

        let err = store.read("missing").await.unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemorySessionStore::new();
        store.create(sample_session("t1")).await.unwrap();

        store.delete("t1").await.unwrap();

        let err = store.read("t1").await.unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_unknown_token_succeeds() {
        let store: MemorySessionStore<String> = MemorySessionStore::new();

        store.delete("missing").await.unwrap();
        store.delete("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_overwrites_same_token() {
        let store = MemorySessionStore::new();
        store.create(sample_session("t1")).await.unwrap();

        let mut replacement = sample_session("t1");
        replacement.claims = "other".to_string();
        store.create(replacement).await.unwrap();

        let session = store.read("t1").await.unwrap();
        assert_eq!(session.claims, "other");
    }
}
