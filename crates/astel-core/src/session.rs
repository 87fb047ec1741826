//! Session context for the login gate.
//!
//! A [`Session`] is an explicit value with an absolute expiry and an idle
//! timeout. It is issued by an [`Authenticator`] and persisted through a
//! [`crate::ports::SessionStore`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Default idle timeout, in minutes.
pub const DEFAULT_IDLE_MINUTES: i64 = 30;

/// Default absolute session lifetime, in hours.
pub const DEFAULT_LIFETIME_HOURS: i64 = 8;

/// Errors from session handling.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid user or password")]
    InvalidCredentials,

    #[error("Not logged in; run `astel login` first")]
    NotLoggedIn,

    #[error("Session expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[error("Session closed after {minutes} minutes of inactivity")]
    Idle { minutes: i64 },

    #[error("Stored session is invalid; run `astel login` again")]
    Invalid,

    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("No operator account configured; set ASTEL_USER and ASTEL_PASSWORD")]
    NotConfigured,
}

/// Timeouts applied to new sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(DEFAULT_IDLE_MINUTES),
            max_lifetime: Duration::hours(DEFAULT_LIFETIME_HOURS),
        }
    }
}

impl SessionPolicy {
    /// Replace the idle timeout. Values below one minute are raised to one.
    ///
    /// Returns `None` when `minutes` does not fit in a [`Duration`].
    pub fn with_idle_minutes(mut self, minutes: i64) -> Option<Self> {
        self.idle_timeout = Duration::try_minutes(minutes.max(1))?;
        Some(self)
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub issued_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub idle_timeout_secs: i64,
}

impl Session {
    pub fn new(user: impl Into<String>, policy: SessionPolicy, now: DateTime<Utc>) -> Self {
        Self {
            user: user.into(),
            issued_at: now,
            last_activity: now,
            expires_at: now + policy.max_lifetime,
            idle_timeout_secs: policy.idle_timeout.num_seconds(),
        }
    }

    /// The idle timeout, or `None` when the stored value is not a positive
    /// duration.
    pub fn idle_timeout(&self) -> Option<Duration> {
        Duration::try_seconds(self.idle_timeout_secs).filter(|idle| *idle > Duration::zero())
    }

    /// Fail if the session is past its lifetime or has been idle too long.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let idle_timeout = self.idle_timeout().ok_or(SessionError::Invalid)?;
        if now >= self.expires_at {
            return Err(SessionError::Expired {
                expired_at: self.expires_at,
            });
        }
        if now - self.last_activity >= idle_timeout {
            return Err(SessionError::Idle {
                minutes: idle_timeout.num_minutes(),
            });
        }
        Ok(())
    }

    /// Record activity at `now`. Never moves the timestamp backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = self.last_activity.max(now);
    }

    /// Time left before the session closes, whichever limit comes first.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let Some(idle_timeout) = self.idle_timeout() else {
            return Duration::zero();
        };
        let until_expiry = self.expires_at - now;
        let remaining = self
            .last_activity
            .checked_add_signed(idle_timeout)
            .map_or(until_expiry, |idle_deadline| until_expiry.min(idle_deadline - now));
        remaining.max(Duration::zero())
    }
}

/// The one configured operator account.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    password_digest: [u8; 32],
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: &str) -> Self {
        Self {
            user: user.into(),
            password_digest: digest(password),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn matches(&self, user: &str, password: &str) -> bool {
        // Compare digests so the comparison length never depends on input.
        let user_ok = digest(user) == digest(&self.user);
        let password_ok = digest(password) == self.password_digest;
        user_ok & password_ok
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password_digest", &"<redacted>")
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Issues sessions for valid credentials.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Option<Credentials>,
    policy: SessionPolicy,
}

impl Authenticator {
    pub const fn new(credentials: Credentials, policy: SessionPolicy) -> Self {
        Self {
            credentials: Some(credentials),
            policy,
        }
    }

    /// An authenticator that refuses every login.
    ///
    /// Existing sessions are still validated by the session service.
    pub const fn unconfigured(policy: SessionPolicy) -> Self {
        Self {
            credentials: None,
            policy,
        }
    }

    pub const fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn login(
        &self,
        user: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let credentials = self.credentials.as_ref().ok_or(SessionError::NotConfigured)?;
        if !credentials.matches(user.trim(), password) {
            tracing::warn!(user = user.trim(), "rejected login attempt");
            return Err(SessionError::InvalidCredentials);
        }
        Ok(Session::new(credentials.user(), self.policy, now))
    }
}
