//! File-backed session persistence.
//!
//! The session lives in `session.json` under the data directory, so every
//! `astel` process run by the same user sees the same login.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use astel_core::{Session, SessionError, SessionStore};
use async_trait::async_trait;

/// Name of the session file inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Resolve the data directory.
///
/// Priority: explicit value (flag or `ASTEL_DATA_DIR`), then the platform
/// data directory joined with `astel`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf, SessionError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    dirs::data_dir()
        .map(|dir| dir.join("astel"))
        .ok_or_else(|| SessionError::Storage {
            message: "cannot determine a data directory; set ASTEL_DATA_DIR".to_string(),
        })
}

/// [`SessionStore`] that keeps the session as JSON on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> SessionError {
    SessionError::Storage {
        message: format!("{}: {err}", path.display()),
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(&self.path, err)),
        };

        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) if session.idle_timeout().is_none() => {
                tracing::warn!(
                    path = %self.path.display(),
                    idle_timeout_secs = session.idle_timeout_secs,
                    "ignoring session file with an invalid idle timeout"
                );
                Ok(None)
            }
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // An unreadable file is treated as no session.
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(parent, e))?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(|e| storage_error(&self.path, e))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| storage_error(&self.path, e))
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(&self.path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astel_core::SessionPolicy;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn session() -> Session {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Session::new("admin", SessionPolicy::default(), now)
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("astel"));

        store.save(&session()).await.unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().await.unwrap(), Some(session()));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&session()).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_logged_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), b"{not json").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_idle_timeout_reads_as_logged_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut value = serde_json::to_value(session()).unwrap();
        value["idle_timeout_secs"] = serde_json::json!(i64::MAX);
        std::fs::write(store.path(), serde_json::to_vec(&value).unwrap()).unwrap();
        assert!(store.load().await.unwrap().is_none());

        value["idle_timeout_secs"] = serde_json::json!(0);
        std::fs::write(store.path(), serde_json::to_vec(&value).unwrap()).unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/srv/astel"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/astel"));
    }
}
