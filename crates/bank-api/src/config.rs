//! # Application Configuration
//!
//! Loaded from environment variables, with an optional YAML accounts file for
//! bearer-token authentication. Command-line flags in the binary override the
//! environment.
//!
//! Variables:
//! - `BANK_PORT` (default: 8080)
//! - `BANK_APP_NAME` (default: `bankAdviceApp`), the alert header prefix
//! - `BANK_ACCOUNTS_FILE` (optional), YAML list of accounts; auth is disabled
//!   when unset
//! - `BANK_METRICS_ENABLED` (default: true)
//! - `BANK_CORS_ENABLED` (default: false)
//! - `BANK_LOG_FORMAT` (`text` or `json`, default: text)

use std::path::{Path, PathBuf};

use bank_core::Authority;
use serde::Deserialize;
use thiserror::Error;

/// Default client application name, used as the alert header prefix.
pub const DEFAULT_APPLICATION_NAME: &str = "bankAdviceApp";

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("invalid boolean for {var}: {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("invalid log format: {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),

    #[error("failed to read accounts file {path}: {source}")]
    AccountsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse accounts file {path}: {source}")]
    AccountsParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// An account allowed to call the API.
///
/// Custom `Debug` implementation redacts the `token` field
/// to prevent credential leakage in log output.
#[derive(Clone, Deserialize)]
pub struct Account {
    pub token: String,
    pub login: String,
    #[serde(default)]
    pub authorities: Vec<Authority>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("token", &"[REDACTED]")
            .field("login", &self.login)
            .field("authorities", &self.authorities)
            .finish()
    }
}

#[derive(Deserialize)]
struct AccountsFile {
    #[serde(default)]
    accounts: Vec<Account>,
}

/// Runtime configuration of the API service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub application_name: String,
    /// Empty means authentication is disabled.
    pub accounts: Vec<Account>,
    pub metrics_enabled: bool,
    pub cors_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            accounts: Vec::new(),
            metrics_enabled: true,
            cors_enabled: false,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("BANK_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let application_name = lookup("BANK_APP_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.application_name);

        let accounts = match lookup("BANK_ACCOUNTS_FILE") {
            Some(path) => load_accounts(Path::new(&path))?,
            None => Vec::new(),
        };

        let metrics_enabled = parse_bool(
            "BANK_METRICS_ENABLED",
            lookup("BANK_METRICS_ENABLED"),
            defaults.metrics_enabled,
        )?;
        let cors_enabled = parse_bool(
            "BANK_CORS_ENABLED",
            lookup("BANK_CORS_ENABLED"),
            defaults.cors_enabled,
        )?;

        let log_format = match lookup("BANK_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            port,
            application_name,
            accounts,
            metrics_enabled,
            cors_enabled,
            log_format,
        })
    }

    /// Whether bearer-token authentication is enforced.
    pub fn auth_enabled(&self) -> bool {
        !self.accounts.is_empty()
    }
}

fn parse_bool(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let normalized = raw.as_deref().map(|v| v.trim().to_ascii_lowercase());
    match normalized {
        None => Ok(default),
        Some(v) if v == "true" || v == "1" => Ok(true),
        Some(v) if v == "false" || v == "0" => Ok(false),
        Some(_) => Err(ConfigError::InvalidBool {
            var,
            value: raw.unwrap_or_default(),
        }),
    }
}

/// Read and parse a YAML accounts file.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::AccountsRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_accounts(&raw).map_err(|source| ConfigError::AccountsParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse accounts from YAML:
///
/// ```yaml
/// accounts:
///   - token: "s3cret"
///     login: "advisor1"
///     authorities: [ROLE_USER, ROLE_ADVISOR]
/// ```
pub fn parse_accounts(yaml: &str) -> Result<Vec<Account>, serde_yaml::Error> {
    let file: AccountsFile = serde_yaml::from_str(yaml)?;
    Ok(file.accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.application_name, "bankAdviceApp");
        assert!(!config.auth_enabled());
        assert!(config.metrics_enabled);
        assert!(!config.cors_enabled);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BANK_PORT", "9000"),
            ("BANK_APP_NAME", "bankApp"),
            ("BANK_METRICS_ENABLED", "false"),
            ("BANK_CORS_ENABLED", "1"),
            ("BANK_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.application_name, "bankApp");
        assert!(!config.metrics_enabled);
        assert!(config.cors_enabled);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("BANK_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup(&[("BANK_METRICS_ENABLED", "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBool {
                var: "BANK_METRICS_ENABLED",
                ..
            }
        ));
    }

    #[test]
    fn missing_accounts_file_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[(
            "BANK_ACCOUNTS_FILE",
            "/nonexistent/bank-accounts.yaml",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::AccountsRead { .. }));
    }

    #[test]
    fn parses_accounts_yaml() {
        let accounts = parse_accounts(
            r#"
accounts:
  - token: "t-advisor"
    login: "advisor1"
    authorities: [ROLE_USER, ROLE_ADVISOR]
  - token: "t-admin"
    login: "admin"
    authorities: [ROLE_ADMIN]
"#,
        )
        .unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].login, "advisor1");
        assert_eq!(
            accounts[0].authorities,
            vec![Authority::User, Authority::Advisor]
        );
    }

    #[test]
    fn unknown_authority_fails_to_parse() {
        let result = parse_accounts(
            r#"
accounts:
  - token: "t"
    login: "x"
    authorities: [ROLE_ROOT]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn account_debug_redacts_token() {
        let account = Account {
            token: "super-secret".to_string(),
            login: "admin".to_string(),
            authorities: vec![Authority::Admin],
        };
        let debug = format!("{account:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
