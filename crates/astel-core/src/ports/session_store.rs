//! Persistence port for the login session.

use async_trait::async_trait;

use crate::session::{Session, SessionError};

/// Stores at most one session.
///
/// Implementations must make a saved session visible to every process that
/// shares the store, and `clear` must be idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, SessionError>;

    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    async fn clear(&self) -> Result<(), SessionError>;
}
