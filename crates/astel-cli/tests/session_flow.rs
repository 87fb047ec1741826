//! Login gate over the file-backed session store.
//!
//! Two service instances sharing one data directory stand in for two
//! `astel` invocations.

use std::sync::Arc;

use astel_cli::FileSessionStore;
use astel_core::{
    Authenticator, Credentials, SessionError, SessionPolicy, SessionService, SessionStore,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn service(dir: &TempDir) -> SessionService {
    let auth = Authenticator::new(
        Credentials::new("operador", "s3nha"),
        SessionPolicy::default().with_idle_minutes(30).unwrap(),
    );
    SessionService::new(auth, Arc::new(FileSessionStore::new(dir.path())))
}

#[tokio::test]
async fn test_login_is_visible_to_the_next_invocation() {
    let dir = tempfile::tempdir().unwrap();

    service(&dir)
        .login_at("operador", "s3nha", t0())
        .await
        .unwrap();

    let session = service(&dir)
        .require_at(t0() + Duration::minutes(10))
        .await
        .unwrap();
    assert_eq!(session.user, "operador");
    assert_eq!(session.last_activity, t0() + Duration::minutes(10));
}

#[tokio::test]
async fn test_activity_extends_the_idle_window() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    svc.login_at("operador", "s3nha", t0()).await.unwrap();

    svc.require_at(t0() + Duration::minutes(25)).await.unwrap();
    svc.require_at(t0() + Duration::minutes(50)).await.unwrap();

    let err = svc
        .require_at(t0() + Duration::minutes(90))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Idle { minutes: 30 }));
}

#[tokio::test]
async fn test_stale_session_is_removed_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    svc.login_at("operador", "s3nha", t0()).await.unwrap();

    assert!(svc.require_at(t0() + Duration::hours(9)).await.is_err());

    let store = FileSessionStore::new(dir.path());
    assert!(!store.path().exists());
    assert!(matches!(
        svc.require_at(t0() + Duration::hours(9)).await,
        Err(SessionError::NotLoggedIn)
    ));
}

#[tokio::test]
async fn test_wrong_password_leaves_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);

    let err = svc.login_at("operador", "errada", t0()).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidCredentials));
    assert!(FileSessionStore::new(dir.path()).load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_then_require_fails() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    svc.login_at("operador", "s3nha", t0()).await.unwrap();

    svc.logout().await.unwrap();
    svc.logout().await.unwrap();

    assert!(matches!(
        svc.require_at(t0()).await,
        Err(SessionError::NotLoggedIn)
    ));
}
