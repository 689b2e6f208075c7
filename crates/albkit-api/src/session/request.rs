// Request execution
//
// Header assembly, URL building and the retry loop shared by every
// endpoint helper. A request is retried on connect/timeout failures,
// HTTP 419 and 5xx; a 401 triggers a fresh login before the next attempt.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, REFERER};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::auth::error_message;
use super::{Session, StatusCheck};
use crate::error::Error;
use crate::options::ResolvedOptions;

const X_AVI_VERSION: HeaderName = HeaderName::from_static("x-avi-version");
const X_AVI_TENANT: HeaderName = HeaderName::from_static("x-avi-tenant");
const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrftoken");
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

impl Session {
    // ── Headers ──────────────────────────────────────────────────────

    /// Headers for one request. User headers go first so the protocol
    /// headers always win.
    pub(super) fn request_headers(
        &self,
        tenant: Option<&str>,
        request_id: Option<&str>,
        login: bool,
    ) -> Result<HeaderMap, Error> {
        let mut headers = self.user_headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(X_AVI_VERSION, header_value("X-Avi-Version", &self.api_version)?);
        headers.insert(
            X_AVI_TENANT,
            header_value("X-Avi-Tenant", tenant.unwrap_or(&self.tenant))?,
        );
        headers.insert(REFERER, header_value("Referer", self.base_url.as_str())?);

        if let Some(id) = request_id {
            headers.insert(X_REQUEST_ID, header_value("X-Request-ID", id)?);
        }

        if !login {
            let (csrf_token, session_id) = self.login_state();
            let mut cookies = Vec::with_capacity(3);
            if let Some(ref token) = csrf_token {
                headers.insert(X_CSRF_TOKEN, header_value("X-CSRFToken", token)?);
                cookies.push(format!("csrftoken={token}"));
            }
            if let Some(ref id) = session_id {
                cookies.push(format!("sessionid={id}"));
                cookies.push(format!("avi-sessionid={id}"));
            }
            if !cookies.is_empty() {
                headers.insert(COOKIE, header_value("Cookie", &cookies.join("; "))?);
            }
        }

        Ok(headers)
    }

    // ── URLs ─────────────────────────────────────────────────────────

    /// Resolve a controller-relative path and append query pairs.
    pub(super) fn request_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Send a request under the retry policy and return the raw body.
    pub(super) async fn execute(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
        opts: &ResolvedOptions,
    ) -> Result<String, Error> {
        self.ensure_authenticated().await?;

        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry.interval).await;
            }

            let err = match self.send_once(&method, url, body, opts).await {
                Ok(text) => return Ok(text),
                Err(err) => err,
            };

            let reauth = matches!(err, Error::Api { status: 401, .. });
            if !reauth && !err.is_transient() {
                return Err(err);
            }
            if attempt == max_attempts {
                last_error = Some(err);
                break;
            }

            warn!(
                attempt,
                max_attempts,
                error = %err,
                "{method} {url} failed, retrying"
            );
            if let Some(ref check) = self.retry.status_check {
                self.wait_for_controller(check).await?;
                self.login().await?;
            } else if reauth {
                self.login().await?;
            }
            last_error = Some(err);
        }

        Err(last_error.unwrap_or_else(|| Error::RetriesExhausted {
            verb: method.to_string(),
            url: url.to_string(),
            attempts: max_attempts,
        }))
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&Value>,
        opts: &ResolvedOptions,
    ) -> Result<String, Error> {
        let headers =
            self.request_headers(opts.tenant.as_deref(), opts.request_id.as_deref(), false)?;

        debug!("{method} {url}");
        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(Error::Api {
                verb: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                message: if text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("no response body").to_owned()
                } else {
                    error_message(&text)
                },
            })
        }
    }

    // ── Controller status ────────────────────────────────────────────

    /// Poll `api/cluster/status` until the controller stops answering
    /// 500/502/503.
    pub(super) async fn wait_for_controller(&self, check: &StatusCheck) -> Result<(), Error> {
        let url = self.base_url.join("api/cluster/status")?;
        for round in 0..check.rounds {
            match self.http.get(url.clone()).send().await {
                Ok(resp) if !matches!(resp.status().as_u16(), 500 | 502 | 503) => {
                    debug!(round, "controller is up");
                    return Ok(());
                }
                Ok(resp) => warn!(round, status = %resp.status(), "controller not ready"),
                Err(e) => warn!(round, error = %e, "controller status probe failed"),
            }
            if round + 1 < check.rounds {
                tokio::time::sleep(check.pause(round)).await;
            }
        }
        Err(Error::ControllerUnavailable {
            url: url.to_string(),
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader {
        name: name.to_owned(),
    })
}

/// Decode a response body; an empty body reads as JSON `null`.
pub(super) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let result = if body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(body)
    };
    result.map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
