// Session login
//
// `POST login` hands back the `csrftoken` and `sessionid` cookies. Both
// are replayed on every later request; the CSRF token is also echoed as
// `X-CSRFToken`.

use secrecy::SecretString;
use tracing::{debug, trace, warn};

use super::{LoginState, Session};
use crate::auth::Credentials;
use crate::error::Error;

impl Session {
    /// Log in and store the session cookies.
    ///
    /// A refreshable token is refreshed while the login body is built
    /// (`Credentials::login_body`).
    pub async fn login(&self) -> Result<(), Error> {
        let body = {
            let credentials = self.credentials.read().expect("credentials lock poisoned");
            credentials.login_body(&self.username)?
        };
        let url = self.base_url.join("login")?;
        let headers = self.request_headers(None, None, true)?;

        debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login returned HTTP {status}: {}", error_message(&text)),
            });
        }

        self.capture_login_cookies(&resp);
        debug!(user = %self.username, "logged in");
        Ok(())
    }

    /// `POST logout` and forget the session cookies.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.base_url.join("logout")?;
        let headers = self.request_headers(None, None, false)?;

        debug!("POST {url}");
        let result = self.http.post(url).headers(headers).send().await;
        *self.login_state.write().expect("login state lock poisoned") = LoginState::default();
        result.map_err(Error::Transport)?;
        Ok(())
    }

    /// Log out and swap in a new password for the next login.
    pub async fn reset_password(&self, password: SecretString) -> Result<(), Error> {
        if let Err(e) = self.logout().await {
            warn!(error = %e, "logout before password reset failed");
        }
        *self.credentials.write().expect("credentials lock poisoned") =
            Credentials::Password(password);
        Ok(())
    }

    /// Whether a session id from a successful login is held.
    pub fn is_authenticated(&self) -> bool {
        self.login_state
            .read()
            .expect("login state lock poisoned")
            .session_id
            .is_some()
    }

    /// Log in first when lazy auth deferred it.
    pub(super) async fn ensure_authenticated(&self) -> Result<(), Error> {
        if self.lazy_auth && !self.is_authenticated() {
            debug!("lazy auth: logging in before first request");
            self.login().await?;
        }
        Ok(())
    }

    pub(super) fn login_state(&self) -> (Option<String>, Option<String>) {
        let state = self.login_state.read().expect("login state lock poisoned");
        (state.csrf_token.clone(), state.session_id.clone())
    }

    /// Keep the cookies only when both the CSRF token and a session id came back.
    fn capture_login_cookies(&self, resp: &reqwest::Response) {
        let mut csrf_token = None;
        let mut session_id = None;
        for cookie in resp.cookies() {
            match cookie.name() {
                "csrftoken" => csrf_token = Some(cookie.value().to_owned()),
                "sessionid" | "avi-sessionid" => session_id = Some(cookie.value().to_owned()),
                _ => {}
            }
        }

        if let (Some(csrf_token), Some(session_id)) = (csrf_token, session_id) {
            trace!("session cookies captured");
            let mut state = self.login_state.write().expect("login state lock poisoned");
            state.csrf_token = Some(csrf_token);
            state.session_id = Some(session_id);
        }
    }
}

/// Best-effort human message from a controller error body.
///
/// The controller answers `{"error": "..."}` for most failures; anything
/// else is passed through verbatim.
pub(super) fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    match parsed.as_ref().and_then(|v| v.get("error")) {
        Some(serde_json::Value::String(msg)) => msg.clone(),
        Some(other) => other.to_string(),
        None => body.trim().to_owned(),
    }
}
