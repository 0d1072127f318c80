use std::sync::Arc;

use chrono::{Duration, Utc};
use http::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};

use crate::session::config::SESSION_COOKIE_NAME;
use crate::session::errors::SessionError;
use crate::store::{Device, Session, SessionStore};
use crate::token::{AccessClaims, TokenError, sign_access_token, verify_access_token};
use crate::utils::gen_random_string;

use super::cookie::{clear_cookies, cookie_value, issue_cookies};

const REFRESH_TOKEN_BYTES: usize = 32;

/// Drives the dual-token session lifecycle: a short-lived signed access
/// token next to a long-lived opaque refresh token, both carried in
/// cookies, with the refresh token rotated on every use.
///
/// Cookie writes go to the `response` header map handed to each operation,
/// so failure paths can expire cookies and still return their error.
pub struct SessionManager<C> {
    secret: Vec<u8>,
    access_timeout: Duration,
    refresh_timeout: Duration,
    store: Arc<dyn SessionStore<C>>,
}

impl<C> SessionManager<C>
where
    C: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(
        secret: impl Into<Vec<u8>>,
        access_timeout: Duration,
        refresh_timeout: Duration,
        store: Arc<dyn SessionStore<C>>,
    ) -> Self {
        Self {
            secret: secret.into(),
            access_timeout,
            refresh_timeout,
            store,
        }
    }

    /// Open a session for freshly authenticated `claims`.
    ///
    /// A session cookie already on the request references a record that is
    /// about to be superseded; it is deleted best-effort before the new
    /// session is issued.
    pub async fn start(
        &self,
        request: &HeaderMap,
        device: Device,
        claims: C,
        response: &mut HeaderMap,
    ) -> Result<(), SessionError> {
        if let Some(current) = cookie_value(request, SESSION_COOKIE_NAME.as_str()) {
            self.delete_best_effort(current, "start").await;
        }

        self.issue(request, device, claims, response).await
    }

    /// Close the presented session. Succeeds whether or not a session
    /// cookie is present, so repeated logouts are harmless.
    pub async fn stop(
        &self,
        request: &HeaderMap,
        response: &mut HeaderMap,
    ) -> Result<(), SessionError> {
        if let Some(current) = cookie_value(request, SESSION_COOKIE_NAME.as_str()) {
            self.delete_best_effort(current, "stop").await;
        }

        clear_cookies(response, request)
    }

    /// Exchange the presented refresh token for a fresh cookie pair.
    ///
    /// The presented token is spent by this call no matter the outcome; a
    /// session past its absolute deadline additionally gets its cookies
    /// expired.
    pub async fn refresh(
        &self,
        request: &HeaderMap,
        device: Device,
        response: &mut HeaderMap,
    ) -> Result<(), SessionError> {
        let Some(current) = cookie_value(request, SESSION_COOKIE_NAME.as_str()) else {
            return Err(SessionError::Unauthorized);
        };

        let session = self.store.read(current).await?;

        self.delete_best_effort(&session.token, "refresh").await;

        if Utc::now() > session.expired {
            tracing::debug!("session past its absolute deadline");
            clear_cookies(response, request)?;
            return Err(SessionError::Unauthorized);
        }

        self.issue(request, device, session.claims, response).await
    }

    /// Verify an access token against this manager's secret.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims<C>, TokenError> {
        verify_access_token(token, &self.secret)
    }

    /// Sign claims, persist the record, and set the cookie pair. On a
    /// failed create the cookies are expired instead, so no access token
    /// circulates without a refreshable record behind it.
    async fn issue(
        &self,
        request: &HeaderMap,
        device: Device,
        claims: C,
        response: &mut HeaderMap,
    ) -> Result<(), SessionError> {
        let access_token = sign_access_token(&claims, &self.secret, self.access_timeout)?;

        let refresh_token = gen_random_string(REFRESH_TOKEN_BYTES)
            .map_err(|e| SessionError::Crypto(e.to_string()))?;
        let now = Utc::now();
        let session = Session {
            token: refresh_token.clone(),
            claims,
            device,
            created: now,
            expired: now + self.refresh_timeout,
        };

        if let Err(err) = self.store.create(session).await {
            clear_cookies(response, request)?;
            return Err(err.into());
        }

        issue_cookies(
            response,
            request,
            &access_token,
            &refresh_token,
            self.access_timeout,
            self.refresh_timeout,
        )?;
        tracing::debug!("issued session cookie pair");
        Ok(())
    }

    /// Cleanup of a superseded or spent record. Failures are logged and
    /// never fail the enclosing operation.
    async fn delete_best_effort(&self, token: &str, op: &str) {
        if let Err(err) = self.store.delete(token).await {
            tracing::warn!("{op}: failed to delete session record: {err}");
        }
    }
}
