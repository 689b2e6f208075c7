//! Configuration for the albkit CLI and other tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `albkit_api::SessionConfig`. The CLI layers its
//! flag overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use albkit_api::{
    Credentials, DEFAULT_API_VERSION, DEFAULT_TENANT, RetryPolicy, SessionConfig, TlsMode,
    TransportConfig,
};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "albkit";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "ALBKIT_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.into()))
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    pub tenant: Option<String>,

    pub api_version: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            tenant: None,
            api_version: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    60
}

/// A named controller profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Controller host, `host:port`, or full URL.
    pub controller: String,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Pre-issued auth token, used when no password resolves.
    pub auth_token: Option<String>,

    /// Default tenant for requests made with this profile.
    pub tenant: Option<String>,

    /// `X-Avi-Version` to send.
    pub api_version: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Total attempts per request.
    pub max_retries: Option<u32>,

    /// Pause between attempts, in milliseconds.
    pub retry_interval_ms: Option<u64>,

    /// Defer login until the first request.
    pub lazy_auth: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$ALBKIT_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "albkit", "albkit").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("albkit");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path`, layered under `ALBKIT_` environment variables.
///
/// Nested keys use a double underscore:
/// `ALBKIT_PROFILES__LAB__TENANT=ops`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ALBKIT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Username from the profile, else `ALBKIT_USERNAME`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    resolve_username_from(profile, profile_name, &env_lookup)
}

/// Resolve login credentials.
///
/// Password order: `password_env`, `ALBKIT_PASSWORD`, system keyring,
/// plaintext. Without any password the profile's `auth_token` is used.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    resolve_credentials_from(profile, profile_name, &env_lookup, &keyring_lookup)
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

fn keyring_lookup(account: &str) -> Option<String> {
    match keyring::Entry::new(KEYRING_SERVICE, account).and_then(|e| e.get_password()) {
        Ok(secret) => Some(secret),
        Err(e) => {
            debug!(account, error = %e, "no keyring entry");
            None
        }
    }
}

fn resolve_username_from(
    profile: &Profile,
    profile_name: &str,
    env: Lookup<'_>,
) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| env("ALBKIT_USERNAME"))
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

fn resolve_credentials_from(
    profile: &Profile,
    profile_name: &str,
    env: Lookup<'_>,
    keyring: Lookup<'_>,
) -> Result<Credentials, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref var) = profile.password_env {
        if let Some(pw) = env(var) {
            return Ok(Credentials::Password(SecretString::from(pw)));
        }
    }

    // 2. Global env var
    if let Some(pw) = env("ALBKIT_PASSWORD") {
        return Ok(Credentials::Password(SecretString::from(pw)));
    }

    // 3. System keyring
    if let Some(pw) = keyring(&format!("{profile_name}/password")) {
        return Ok(Credentials::Password(SecretString::from(pw)));
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(Credentials::Password(SecretString::from(pw.clone())));
    }

    if let Some(ref token) = profile.auth_token {
        return Ok(Credentials::AuthToken(SecretString::from(token.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Session config ──────────────────────────────────────────────────

/// Reject controller values the session could never reach.
pub fn validate_controller(controller: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Validation {
        field: "controller".into(),
        reason: format!("{reason}: '{controller}'"),
    };

    let trimmed = controller.trim();
    if trimmed.is_empty() {
        return Err(invalid("controller is empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid("controller contains whitespace"));
    }
    if trimmed.contains("://") {
        let url: url::Url = trimmed.parse().map_err(|_| invalid("invalid URL"))?;
        if url.host_str().is_none() {
            return Err(invalid("URL has no host"));
        }
    }
    Ok(())
}

/// Build a `SessionConfig` from a profile and the global defaults.
pub fn profile_to_session_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<SessionConfig, ConfigError> {
    validate_controller(&profile.controller)?;
    let username = resolve_username(profile, profile_name)?;
    let credentials = resolve_credentials(profile, profile_name)?;
    Ok(build_session_config(profile, defaults, username, credentials))
}

fn build_session_config(
    profile: &Profile,
    defaults: &Defaults,
    username: String,
    credentials: Credentials,
) -> SessionConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let mut retry = RetryPolicy::default();
    if let Some(attempts) = profile.max_retries {
        retry.max_attempts = attempts.max(1);
    }
    if let Some(ms) = profile.retry_interval_ms {
        retry.interval = Duration::from_millis(ms);
    }

    let tenant = profile
        .tenant
        .clone()
        .or_else(|| defaults.tenant.clone())
        .unwrap_or_else(|| DEFAULT_TENANT.into());
    let api_version = profile
        .api_version
        .clone()
        .or_else(|| defaults.api_version.clone())
        .unwrap_or_else(|| DEFAULT_API_VERSION.into());

    SessionConfig::new(profile.controller.trim(), username, credentials)
        .tenant(tenant)
        .api_version(api_version)
        .transport(TransportConfig { tls, timeout })
        .retry(retry)
        .lazy_auth(profile.lazy_auth.unwrap_or(false))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn lab_profile() -> Profile {
        Profile {
            controller: "10.10.1.5".into(),
            username: Some("admin".into()),
            password: Some("plain".into()),
            ..Profile::default()
        }
    }

    fn password_of(creds: &Credentials) -> String {
        use secrecy::ExposeSecret;
        match creds {
            Credentials::Password(pw) => pw.expose_secret().to_owned(),
            other => panic!("expected password, got {other:?}"),
        }
    }

    #[test]
    fn password_env_wins() {
        let profile = Profile {
            password_env: Some("LAB_PW".into()),
            ..lab_profile()
        };
        let env = |var: &str| match var {
            "LAB_PW" => Some("from-profile-env".to_owned()),
            "ALBKIT_PASSWORD" => Some("from-global-env".to_owned()),
            _ => None,
        };
        let creds = resolve_credentials_from(&profile, "lab", &env, &no_env).unwrap();
        assert_eq!(password_of(&creds), "from-profile-env");
    }

    #[test]
    fn keyring_beats_plaintext() {
        let keyring = |account: &str| (account == "lab/password").then(|| "from-keyring".to_owned());
        let creds = resolve_credentials_from(&lab_profile(), "lab", &no_env, &keyring).unwrap();
        assert_eq!(password_of(&creds), "from-keyring");
    }

    #[test]
    fn plaintext_is_last_password_source() {
        let creds = resolve_credentials_from(&lab_profile(), "lab", &no_env, &no_env).unwrap();
        assert_eq!(password_of(&creds), "plain");
    }

    #[test]
    fn auth_token_used_without_password() {
        let profile = Profile {
            password: None,
            auth_token: Some("tok".into()),
            ..lab_profile()
        };
        let creds = resolve_credentials_from(&profile, "lab", &no_env, &no_env).unwrap();
        assert!(matches!(creds, Credentials::AuthToken(_)));
    }

    #[test]
    fn no_credentials_is_an_error() {
        let profile = Profile {
            password: None,
            ..lab_profile()
        };
        let err = resolve_credentials_from(&profile, "lab", &no_env, &no_env).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { profile } if profile == "lab"));
    }

    #[test]
    fn username_falls_back_to_env() {
        let profile = Profile {
            username: None,
            ..lab_profile()
        };
        let env = |var: &str| (var == "ALBKIT_USERNAME").then(|| "ops".to_owned());
        assert_eq!(resolve_username_from(&profile, "lab", &env).unwrap(), "ops");
    }

    #[test]
    fn controller_validation() {
        assert!(validate_controller("10.10.1.5").is_ok());
        assert!(validate_controller("https://ctrl.example.com:8443").is_ok());
        assert!(validate_controller("").is_err());
        assert!(validate_controller("ctrl example").is_err());
        assert!(validate_controller("https://").is_err());
    }

    #[test]
    fn session_config_layers_profile_over_defaults() {
        let defaults = Defaults {
            tenant: Some("shared".into()),
            timeout: 15,
            ..Defaults::default()
        };
        let profile = Profile {
            tenant: Some("ops".into()),
            max_retries: Some(5),
            retry_interval_ms: Some(250),
            insecure: Some(true),
            lazy_auth: Some(true),
            ..lab_profile()
        };
        let config = build_session_config(
            &profile,
            &defaults,
            "admin".into(),
            Credentials::Password("pw".to_string().into()),
        );
        assert_eq!(config.tenant, "ops");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.transport.timeout, Duration::from_secs(15));
        assert!(matches!(config.transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.interval, Duration::from_millis(250));
        assert!(config.lazy_auth);
    }

    #[test]
    fn ca_cert_selects_custom_tls() {
        let profile = Profile {
            ca_cert: Some(PathBuf::from("/etc/albkit/ca.pem")),
            ..lab_profile()
        };
        let config = build_session_config(
            &profile,
            &Defaults::default(),
            "admin".into(),
            Credentials::Password("pw".to_string().into()),
        );
        assert!(matches!(config.transport.tls, TlsMode::CustomCa(_)));
        assert_eq!(config.tenant, DEFAULT_TENANT);
    }
}
