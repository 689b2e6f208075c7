// Controller session
//
// Authenticated transport for the controller's REST API: owns the HTTP
// client, the login state (CSRF token and session id) and the retry policy.
// Login, request execution and the public endpoint helpers are inherent
// methods split across the sibling files.

mod auth;
mod ops;
mod request;

pub use ops::CollectionPage;

use std::net::Ipv6Addr;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// API version sent in `X-Avi-Version` when none is configured.
pub const DEFAULT_API_VERSION: &str = "18.2.6";

/// Tenant sent in `X-Avi-Tenant` when neither the session nor the call sets one.
pub const DEFAULT_TENANT: &str = "admin";

// ── Retry policy ─────────────────────────────────────────────────────

/// How transient failures are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub interval: Duration,
    /// Wait for the controller to answer its status endpoint before retrying.
    pub status_check: Option<StatusCheck>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            interval: Duration::from_millis(500),
            status_check: None,
        }
    }
}

impl RetryPolicy {
    /// A policy that sends each request exactly once.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Bounds for polling `api/cluster/status`.
#[derive(Debug, Clone)]
pub struct StatusCheck {
    pub rounds: u32,
    /// Fixed pause between rounds. `None` backs off exponentially from 3s,
    /// capped at 30s.
    pub interval: Option<Duration>,
}

impl Default for StatusCheck {
    fn default() -> Self {
        Self {
            rounds: 10,
            interval: None,
        }
    }
}

impl StatusCheck {
    const BACKOFF_CAP: Duration = Duration::from_secs(30);

    pub(crate) fn pause(&self, round: u32) -> Duration {
        self.interval.unwrap_or_else(|| {
            let secs = f64::from(round).exp() * 3.0;
            Duration::try_from_secs_f64(secs)
                .unwrap_or(Self::BACKOFF_CAP)
                .min(Self::BACKOFF_CAP)
        })
    }
}

// ── Config ───────────────────────────────────────────────────────────

/// Everything needed to open a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Host name or address, optionally with scheme and port.
    pub controller: String,
    pub username: String,
    pub credentials: Credentials,
    pub tenant: String,
    pub api_version: String,
    pub transport: TransportConfig,
    pub retry: RetryPolicy,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
    /// Defer login until the first request.
    pub lazy_auth: bool,
}

impl SessionConfig {
    pub fn new(
        controller: impl Into<String>,
        username: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            controller: controller.into(),
            username: username.into(),
            credentials,
            tenant: DEFAULT_TENANT.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            transport: TransportConfig::default(),
            retry: RetryPolicy::default(),
            headers: Vec::new(),
            lazy_auth: false,
        }
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn lazy_auth(mut self, lazy: bool) -> Self {
        self.lazy_auth = lazy;
        self
    }
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct LoginState {
    csrf_token: Option<String>,
    session_id: Option<String>,
}

/// Authenticated connection to one controller.
///
/// `Send + Sync`; share it behind an `Arc` or borrow it into resource
/// clients. Login state is refreshed in place when the controller
/// answers 401.
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    credentials: RwLock<Credentials>,
    tenant: String,
    api_version: String,
    retry: RetryPolicy,
    user_headers: HeaderMap,
    lazy_auth: bool,
    login_state: RwLock<LoginState>,
}

impl Session {
    /// Build a session without touching the network.
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        let base_url = controller_base_url(&config.controller)?;
        let user_headers = header_map(&config.headers)?;
        let http = config.transport.build_client()?;
        let tenant = if config.tenant.is_empty() {
            DEFAULT_TENANT.to_owned()
        } else {
            config.tenant
        };
        let api_version = if config.api_version.is_empty() {
            DEFAULT_API_VERSION.to_owned()
        } else {
            config.api_version
        };

        Ok(Self {
            http,
            base_url,
            username: config.username,
            credentials: RwLock::new(config.credentials),
            tenant,
            api_version,
            retry: config.retry,
            user_headers,
            lazy_auth: config.lazy_auth,
            login_state: RwLock::new(LoginState::default()),
        })
    }

    /// Build a session and log in, unless lazy auth is configured.
    pub async fn connect(config: SessionConfig) -> Result<Self, Error> {
        let session = Self::new(config)?;
        if !session.lazy_auth {
            session.login().await?;
        }
        Ok(session)
    }

    /// Controller root, e.g. `https://10.0.0.5/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("tenant", &self.tenant)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// `https://<host>/`, bracketing bare IPv6 literals. A controller given
/// with a scheme is used as-is.
fn controller_base_url(controller: &str) -> Result<Url, Error> {
    let controller = controller.trim().trim_end_matches('/');
    let raw = if controller.contains("://") {
        format!("{controller}/")
    } else if controller.parse::<Ipv6Addr>().is_ok() {
        format!("https://[{controller}]/")
    } else {
        format!("https://{controller}/")
    };
    Ok(Url::parse(&raw)?)
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || Error::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
