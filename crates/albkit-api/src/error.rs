use thiserror::Error;

/// Top-level error type for the `albkit-api` crate.
///
/// Covers every failure mode of the session transport and the resource
/// clients built on it. Errors raised by the controller keep the verb, URL
/// and status of the failing request so callers can tell a missing object
/// from a rejected payload without parsing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, token refresh failed, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}")]
    InvalidHeader { name: String },

    /// Every attempt allowed by the retry policy failed without a
    /// more specific error to report.
    #[error("{verb} {url} failed after {attempts} attempts")]
    RetriesExhausted {
        verb: String,
        url: String,
        attempts: u32,
    },

    /// The controller kept answering 500/502/503 on its status endpoint.
    #[error("Controller at {url} did not become available")]
    ControllerUnavailable { url: String },

    // ── Controller API ──────────────────────────────────────────────
    /// Non-2xx response from the controller.
    #[error("{verb} {url} returned HTTP {status}: {message}")]
    Api {
        verb: String,
        url: String,
        status: u16,
        message: String,
    },

    /// A name-filtered lookup matched nothing.
    #[error("No {kind} object named '{name}' found")]
    ObjectNotFound { kind: String, name: String },

    /// A name-filtered lookup matched more than one object.
    #[error("{count} {kind} objects named '{name}' found, expected exactly one")]
    AmbiguousObject {
        kind: String,
        name: String,
        count: u64,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request payload could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Caller contract ─────────────────────────────────────────────
    /// Update or delete-by-name was handed an object without a uuid.
    #[error("{kind} object has no uuid; create or fetch it before addressing it by uuid")]
    MissingUuid { kind: &'static str },

    /// The options passed to a session call are incomplete.
    #[error("Invalid request options: {0}")]
    InvalidOptions(&'static str),
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Api { status: 401, .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 419 || (500..600).contains(status),
            Self::RetriesExhausted { .. } | Self::ControllerUnavailable { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } | Self::ObjectNotFound { .. } => true,
            _ => false,
        }
    }

    /// The HTTP status the controller answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
