use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::errors::StoreError;

/// Client details captured from the request that opened a session.
///
/// Recorded alongside the session for diagnostics; refresh does not
/// currently compare them against the refreshing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub ip: String,
    pub user_agent: String,
}

impl Device {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Server-side session record, keyed by its opaque refresh-token id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session<C> {
    /// Opaque refresh-token id. The only client-held reference to this
    /// record, replaced on every refresh.
    pub token: String,

    /// Application-defined identity claims, re-signed into each access
    /// token issued for this session.
    pub claims: C,

    pub device: Device,

    pub created: DateTime<Utc>,

    /// Absolute deadline. A refresh after this instant fails, and no
    /// refresh ever moves it.
    pub expired: DateTime<Utc>,
}

/// Mapping from refresh-token id to session record.
///
/// Implementations must be safe for concurrent use. `delete` of an unknown
/// id succeeds, so racing rotations degrade to a harmless double delete.
#[async_trait]
pub trait SessionStore<C>: Send + Sync {
    /// Persist a new record under its token id.
    async fn create(&self, session: Session<C>) -> Result<(), StoreError>;

    /// Look up a record by refresh-token id.
    async fn read(&self, token: &str) -> Result<Session<C>, StoreError>;

    /// Remove a record. Unknown ids are not an error.
    async fn delete(&self, token: &str) -> Result<(), StoreError>;
}

/// In-memory session store for development and tests.
pub struct MemorySessionStore<C> {
    pub(super) entries: Mutex<HashMap<String, Session<C>>>,
}

/// Redis-backed session store. Records are stored as JSON with a TTL
/// matching their absolute deadline.
pub struct RedisSessionStore {
    pub(super) client: redis::Client,
}
