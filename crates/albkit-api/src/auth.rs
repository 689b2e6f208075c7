use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use crate::error::Error;

/// Callback producing a fresh auth token for each login.
///
/// Returning `Err` aborts the login with [`Error::Authentication`].
pub type TokenRefresh = Arc<dyn Fn() -> Result<SecretString, String> + Send + Sync>;

/// Credentials for authenticating a session with the controller.
///
/// Each variant carries the secret material needed for its login body.
#[derive(Clone)]
pub enum Credentials {
    /// Username + password login.
    Password(SecretString),

    /// Pre-issued auth token, sent as `token` in the login body.
    AuthToken(SecretString),

    /// Auth token minted on demand. The callback runs on every login,
    /// including re-logins after the controller answers 401.
    RefreshableToken(TokenRefresh),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Password(_) => "Password",
            Self::AuthToken(_) => "AuthToken",
            Self::RefreshableToken(_) => "RefreshableToken",
        };
        write!(f, "Credentials::{variant}([REDACTED])")
    }
}

impl Credentials {
    /// Build the JSON body for `POST login`.
    pub(crate) fn login_body(&self, username: &str) -> Result<Value, Error> {
        let body = match self {
            Self::Password(password) => json!({
                "username": username,
                "password": password.expose_secret(),
            }),
            Self::AuthToken(token) => json!({
                "username": username,
                "token": token.expose_secret(),
            }),
            Self::RefreshableToken(refresh) => {
                let token = refresh().map_err(|message| Error::Authentication {
                    message: format!("token refresh failed: {message}"),
                })?;
                json!({
                    "username": username,
                    "token": token.expose_secret(),
                })
            }
        };
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn password_login_body() {
        let creds = Credentials::Password("s3cret".to_string().into());
        let body = creds.login_body("admin").unwrap();
        assert_eq!(body, json!({"username": "admin", "password": "s3cret"}));
    }

    #[test]
    fn refreshable_token_runs_callback() {
        let creds =
            Credentials::RefreshableToken(Arc::new(|| Ok("fresh".to_string().into())));
        let body = creds.login_body("admin").unwrap();
        assert_eq!(body, json!({"username": "admin", "token": "fresh"}));
    }

    #[test]
    fn failed_refresh_is_authentication_error() {
        let creds = Credentials::RefreshableToken(Arc::new(|| Err("expired".into())));
        let err = creds.login_body("admin").unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::AuthToken("tok".to_string().into());
        assert_eq!(format!("{creds:?}"), "Credentials::AuthToken([REDACTED])");
    }
}
