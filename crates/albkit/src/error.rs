//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use albkit_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(albkit::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Try: albkit version --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: albkit_api::Error,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(albkit::tls_error),
        help(
            "Controllers usually ship a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    #[error("Controller at {url} is not available")]
    #[diagnostic(
        code(albkit::controller_unavailable),
        help("The controller kept failing its status check. Retry once the cluster is up.")
    )]
    ControllerUnavailable { url: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(albkit::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout {
        #[source]
        source: albkit_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(albkit::auth_failed),
        help(
            "Verify the username and password for this profile.\n\
             Passwords resolve from password_env, ALBKIT_PASSWORD, the system keyring, then the config file."
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(albkit::no_credentials),
        help(
            "Set username and password (or password_env) in the profile,\n\
             or export ALBKIT_USERNAME and ALBKIT_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Unknown object kind '{kind}'")]
    #[diagnostic(
        code(albkit::unknown_kind),
        help("Run: albkit kinds to see the supported kinds")
    )]
    UnknownKind { kind: String },

    #[error("{kind} '{identifier}' not found")]
    #[diagnostic(
        code(albkit::not_found),
        help("Run: albkit list {kind} to see available objects")
    )]
    NotFound { kind: String, identifier: String },

    #[error("{count} {kind} objects named '{name}'")]
    #[diagnostic(
        code(albkit::ambiguous),
        help("Address the object by uuid, or narrow the lookup with --tenant.")
    )]
    Ambiguous {
        kind: String,
        name: String,
        count: u64,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{verb} {url} failed with HTTP {status}: {message}")]
    #[diagnostic(code(albkit::api_error))]
    ApiError {
        verb: String,
        url: String,
        status: u16,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(code(albkit::api))]
    Api(albkit_api::Error),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(albkit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(albkit::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(albkit::no_config),
        help(
            "Add a profile to {path},\n\
             or pass --controller (-c) with ALBKIT_USERNAME and ALBKIT_PASSWORD set."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(albkit::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(albkit::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(albkit::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. }
            | Self::TlsError { .. }
            | Self::ControllerUnavailable { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Ambiguous { .. } => exit_code::CONFLICT,
            Self::ApiError { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                409 => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::UnknownKind { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── albkit_api::Error → CliError mapping ─────────────────────────────

impl From<albkit_api::Error> for CliError {
    fn from(err: albkit_api::Error) -> Self {
        use albkit_api::Error as E;

        match err {
            E::Authentication { message } => CliError::AuthFailed { message },

            E::Transport(ref e) if e.is_timeout() => CliError::Timeout { source: err },

            E::Transport(ref e) if e.is_connect() => CliError::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: err,
            },

            E::Tls(reason) => CliError::TlsError { reason },

            E::RetriesExhausted { url, .. } | E::ControllerUnavailable { url } => {
                CliError::ControllerUnavailable { url }
            }

            E::Api {
                verb,
                url,
                status,
                message,
            } => CliError::ApiError {
                verb,
                url,
                status,
                message,
            },

            E::ObjectNotFound { kind, name } => CliError::NotFound {
                kind,
                identifier: name,
            },

            E::AmbiguousObject { kind, name, count } => CliError::Ambiguous { kind, name, count },

            E::MissingUuid { kind } => CliError::Validation {
                field: "uuid".into(),
                reason: format!("the {kind} payload must carry a non-empty uuid"),
            },

            other => CliError::Api(other),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile(name) => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> albkit_api::Error {
        albkit_api::Error::Api {
            verb: "GET".into(),
            url: "https://ctrl/api/pool/p-1".into(),
            status,
            message: "boom".into(),
        }
    }

    #[test]
    fn http_status_drives_exit_code() {
        assert_eq!(CliError::from(api(401)).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(api(403)).exit_code(), exit_code::PERMISSION);
        assert_eq!(CliError::from(api(404)).exit_code(), exit_code::NOT_FOUND);
        assert_eq!(CliError::from(api(500)).exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn lookup_errors_map_to_resource_errors() {
        let missing = CliError::from(albkit_api::Error::ObjectNotFound {
            kind: "Pool".into(),
            name: "web".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let ambiguous = CliError::from(albkit_api::Error::AmbiguousObject {
            kind: "Pool".into(),
            name: "web".into(),
            count: 2,
        });
        assert_eq!(ambiguous.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn auth_and_availability_errors() {
        let auth = CliError::from(albkit_api::Error::Authentication {
            message: "bad password".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let down = CliError::from(albkit_api::Error::ControllerUnavailable {
            url: "https://ctrl/".into(),
        });
        assert_eq!(down.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn config_errors_are_usage_or_auth() {
        let unknown = CliError::from(ConfigError::UnknownProfile("lab".into()));
        assert_eq!(unknown.exit_code(), exit_code::USAGE);

        let creds = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert_eq!(creds.exit_code(), exit_code::AUTH);
    }
}
