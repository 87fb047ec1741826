//! Login, logout and session validation over a [`SessionStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ports::SessionStore;
use crate::session::{Authenticator, Session, SessionError};

/// Owns the session lifecycle.
#[derive(Clone)]
pub struct SessionService {
    authenticator: Authenticator,
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(authenticator: Authenticator, store: Arc<dyn SessionStore>) -> Self {
        Self {
            authenticator,
            store,
        }
    }

    pub async fn login(&self, user: &str, password: &str) -> Result<Session, SessionError> {
        self.login_at(user, password, Utc::now()).await
    }

    pub async fn login_at(
        &self,
        user: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let session = self.authenticator.login(user, password, now)?;
        self.store.save(&session).await?;
        tracing::info!(user = %session.user, expires_at = %session.expires_at, "logged in");
        Ok(session)
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.store.clear().await
    }

    /// The current session, refreshed with activity at now.
    pub async fn require(&self) -> Result<Session, SessionError> {
        self.require_at(Utc::now()).await
    }

    /// Validate the stored session at `now` and record the activity.
    ///
    /// An expired or idle session is removed from the store.
    pub async fn require_at(&self, now: DateTime<Utc>) -> Result<Session, SessionError> {
        let mut session = self.store.load().await?.ok_or(SessionError::NotLoggedIn)?;

        if let Err(err) = session.check(now) {
            tracing::debug!(user = %session.user, error = %err, "dropping stale session");
            self.store.clear().await?;
            return Err(err);
        }

        session.touch(now);
        self.store.save(&session).await?;
        Ok(session)
    }

    /// The stored session without validating or refreshing it.
    pub async fn peek(&self) -> Result<Option<Session>, SessionError> {
        self.store.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, SessionPolicy};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        slot: Mutex<Option<Session>>,
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn load(&self) -> Result<Option<Session>, SessionError> {
            Ok(self.slot.lock().unwrap().clone())
        }

        async fn save(&self, session: &Session) -> Result<(), SessionError> {
            *self.slot.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), SessionError> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn service() -> (SessionService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let auth = Authenticator::new(Credentials::new("admin", "pw"), SessionPolicy::default());
        (SessionService::new(auth, store.clone()), store)
    }

    #[tokio::test]
    async fn test_require_without_login() {
        let (svc, _) = service();
        assert!(matches!(
            svc.require_at(t0()).await,
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_login_then_require_refreshes_activity() {
        let (svc, store) = service();
        svc.login_at("admin", "pw", t0()).await.unwrap();

        let later = t0() + Duration::minutes(10);
        let session = svc.require_at(later).await.unwrap();
        assert_eq!(session.last_activity, later);
        assert_eq!(store.load().await.unwrap().unwrap().last_activity, later);
    }

    #[tokio::test]
    async fn test_idle_session_is_cleared() {
        let (svc, store) = service();
        svc.login_at("admin", "pw", t0()).await.unwrap();

        let err = svc.require_at(t0() + Duration::hours(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Idle { .. }));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tampered_idle_timeout_is_cleared() {
        let (svc, store) = service();
        let mut session = svc.login_at("admin", "pw", t0()).await.unwrap();
        session.idle_timeout_secs = i64::MAX;
        store.save(&session).await.unwrap();

        let err = svc.require_at(t0() + Duration::minutes(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Invalid));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_empty() {
        let (svc, store) = service();
        assert!(svc.login_at("admin", "nope", t0()).await.is_err());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout() {
        let (svc, _) = service();
        svc.login_at("admin", "pw", t0()).await.unwrap();
        svc.logout().await.unwrap();
        assert!(svc.peek().await.unwrap().is_none());
    }
}
