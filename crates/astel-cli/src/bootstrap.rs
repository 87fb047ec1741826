//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. The HTTP client (via astel-api) backs both the
//! registry and the autocomplete ports; the session store is file-backed.
//!
//! Command handlers receive the composed [`CliContext`].

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use astel_api::{ApiClientConfig, DefaultApiClient};
use astel_core::{
    AutocompleteConfig, AutocompleteLookup, Autocompleter, Authenticator, Credentials,
    RegistryPort, RegistryService, SessionPolicy, SessionService,
};

use crate::error::CliError;
use crate::parser::Cli;
use crate::session_store::{FileSessionStore, resolve_data_dir};

/// Environment variable holding the operator user name.
pub const USER_ENV: &str = "ASTEL_USER";
/// Environment variable holding the operator password.
pub const PASSWORD_ENV: &str = "ASTEL_PASSWORD";
/// Environment variable overriding the idle timeout, in minutes.
pub const IDLE_MINUTES_ENV: &str = "ASTEL_SESSION_IDLE_MINUTES";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Service root; `None` uses the client default.
    pub base_url: Option<String>,
    /// Directory holding the session file.
    pub data_dir: PathBuf,
    /// The operator account, when configured.
    pub credentials: Option<Credentials>,
    /// Timeouts for new sessions.
    pub policy: SessionPolicy,
}

impl CliConfig {
    /// Resolve configuration from parsed flags and the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn resolve(cli: &Cli, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = resolve_data_dir(cli.data_dir.as_deref()).map_err(CliError::from)?;

        let credentials = match (var(USER_ENV), var(PASSWORD_ENV)) {
            (Some(user), Some(password)) if !user.trim().is_empty() => {
                Some(Credentials::new(user.trim(), &password))
            }
            _ => None,
        };

        let mut policy = SessionPolicy::default();
        if let Some(raw) = var(IDLE_MINUTES_ENV) {
            let minutes: i64 = raw.trim().parse().map_err(|_| {
                CliError::Config(format!(
                    "{IDLE_MINUTES_ENV} must be a number of minutes, got '{raw}'"
                ))
            })?;
            policy = policy.with_idle_minutes(minutes).ok_or_else(|| {
                CliError::Config(format!("{IDLE_MINUTES_ENV} is out of range: {minutes}"))
            })?;
        }

        Ok(Self {
            base_url: cli.base_url.clone().filter(|u| !u.trim().is_empty()),
            data_dir,
            credentials,
            policy,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Registration and payment operations.
    pub registry: RegistryService,
    /// Login gate.
    pub sessions: SessionService,
    /// Name lookup backing the autocomplete.
    pub lookup: Arc<dyn AutocompleteLookup>,
}

impl CliContext {
    pub fn registry(&self) -> &RegistryService {
        &self.registry
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// An autocompleter returning at most `limit` suggestions.
    ///
    /// One-shot lookups skip the debounce window.
    pub fn autocompleter(&self, limit: Option<u32>) -> Autocompleter<dyn AutocompleteLookup> {
        let defaults = AutocompleteConfig::default();
        Autocompleter::new(
            Arc::clone(&self.lookup),
            AutocompleteConfig {
                debounce: Duration::ZERO,
                limit: limit.filter(|l| *l > 0).unwrap_or(defaults.limit),
                ..defaults
            },
        )
    }
}

/// Bootstrap the CLI application.
///
/// Builds the HTTP client once and hands it to the services through the
/// core port traits.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot
/// be created.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let mut api_config = ApiClientConfig::new();
    if let Some(url) = &config.base_url {
        api_config = api_config.with_base_url(url.as_str());
    }

    let client = Arc::new(
        DefaultApiClient::new(&api_config)
            .map_err(CliError::from)
            .context("Failed to create service client")?,
    );
    let registry_port: Arc<dyn RegistryPort> = client.clone();
    let lookup: Arc<dyn AutocompleteLookup> = client;

    let authenticator = match config.credentials {
        Some(credentials) => Authenticator::new(credentials, config.policy),
        None => Authenticator::unconfigured(config.policy),
    };
    let store = Arc::new(FileSessionStore::new(&config.data_dir));
    tracing::debug!(session_file = %store.path().display(), "session store ready");

    Ok(CliContext {
        registry: RegistryService::new(registry_port),
        sessions: SessionService::new(authenticator, store),
        lookup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_reads_credentials_and_idle() {
        let cli = cli(&["astel", "--data-dir", "/tmp/astel-test", "whoami"]);
        let config = CliConfig::resolve(
            &cli,
            env_of(&[
                (USER_ENV, " operador "),
                (PASSWORD_ENV, "pw"),
                (IDLE_MINUTES_ENV, "5"),
            ]),
        )
        .unwrap();

        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.user(), "operador");
        assert!(credentials.matches("operador", "pw"));
        assert_eq!(config.policy.idle_timeout, chrono::Duration::minutes(5));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/astel-test"));
    }

    #[test]
    fn test_resolve_without_credentials() {
        let cli = cli(&["astel", "--data-dir", "/tmp/astel-test", "whoami"]);
        let config = CliConfig::resolve(&cli, env_of(&[(USER_ENV, "admin")])).unwrap();
        assert!(config.credentials.is_none());
        assert_eq!(config.policy, SessionPolicy::default());
    }

    #[test]
    fn test_resolve_rejects_bad_idle_minutes() {
        let cli = cli(&["astel", "--data-dir", "/tmp/astel-test", "whoami"]);
        let result = CliConfig::resolve(&cli, env_of(&[(IDLE_MINUTES_ENV, "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_rejects_oversized_idle_minutes() {
        let cli = cli(&["astel", "--data-dir", "/tmp/astel-test", "whoami"]);
        let oversized = (i64::MAX / 2).to_string();
        let err = CliConfig::resolve(&cli, env_of(&[(IDLE_MINUTES_ENV, &oversized)])).unwrap_err();
        assert_eq!(crate::error::exit_code_for(&err), 78);
        assert!(err.to_string().contains(IDLE_MINUTES_ENV));
    }

    #[test]
    fn test_bootstrap_rejects_bad_base_url() {
        let cli = cli(&[
            "astel",
            "--base-url",
            "not a url",
            "--data-dir",
            "/tmp/astel-test",
            "whoami",
        ]);
        let config = CliConfig::resolve(&cli, env_of(&[])).unwrap();
        assert!(bootstrap(config).is_err());
    }
}
