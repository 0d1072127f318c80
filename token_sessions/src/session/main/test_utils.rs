//! Shared fixtures for session manager tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use http::HeaderMap;
use http::header::{COOKIE, HOST, SET_COOKIE};
use serde::{Deserialize, Serialize};

use crate::store::{Device, MemorySessionStore, Session, SessionStore, StoreError};

use super::manager::SessionManager;

/// Claims shape used across manager tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TestClaims {
    #[serde(rename = "Name")]
    pub(crate) name: String,
}

pub(crate) fn test_claims() -> TestClaims {
    TestClaims {
        name: "Jhon Doe".to_string(),
    }
}

pub(crate) fn test_device() -> Device {
    Device::new("192.0.2.1:4321", "manager-tests")
}

/// Manager with the 5 minute access / 10 minute refresh timeouts the
/// cookie assertions expect.
pub(crate) fn test_manager(store: Arc<dyn SessionStore<TestClaims>>) -> SessionManager<TestClaims> {
    SessionManager::new(
        b"secret".to_vec(),
        Duration::minutes(5),
        Duration::minutes(10),
        store,
    )
}

/// Request headers with a Host and, optionally, a session cookie.
pub(crate) fn request_headers(host: &str, session_token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HOST, host.parse().unwrap());
    if let Some(token) = session_token {
        headers.insert(COOKIE, format!("session={token}").parse().unwrap());
    }
    headers
}

/// First `Set-Cookie` value for `name` in a response header map.
pub(crate) fn set_cookie_for(response: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v.to_string())
}

/// Cookie value out of a `Set-Cookie` string.
pub(crate) fn cookie_pair_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .splitn(2, '=')
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

/// `Max-Age` attribute out of a `Set-Cookie` string.
pub(crate) fn max_age(set_cookie: &str) -> Option<i64> {
    set_cookie
        .split(';')
        .map(str::trim)
        .find_map(|attr| attr.strip_prefix("Max-Age="))
        .and_then(|v| v.parse().ok())
}

/// Store wrapper that fails selected operations, standing in for a backend
/// outage.
pub(crate) struct FailingStore {
    pub(crate) inner: MemorySessionStore<TestClaims>,
    fail_create: bool,
    fail_read: bool,
    fail_delete: bool,
}

impl FailingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemorySessionStore::new(),
            fail_create: false,
            fail_read: false,
            fail_delete: false,
        }
    }

    pub(crate) fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub(crate) fn fail_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub(crate) fn fail_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }
}

#[async_trait]
impl SessionStore<TestClaims> for FailingStore {
    async fn create(&self, session: Session<TestClaims>) -> Result<(), StoreError> {
        if self.fail_create {
            return Err(StoreError::Backend("create failed".to_string()));
        }
        self.inner.create(session).await
    }

    async fn read(&self, token: &str) -> Result<Session<TestClaims>, StoreError> {
        if self.fail_read {
            return Err(StoreError::Backend("read failed".to_string()));
        }
        self.inner.read(token).await
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        if self.fail_delete {
            return Err(StoreError::Backend("delete failed".to_string()));
        }
        self.inner.delete(token).await
    }
}
