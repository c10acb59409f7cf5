use std::{env, fmt, time::Duration};

use super::errors::OAuth2ConfigError;
use crate::config::CALLBACK_ROUTE;

const DEFAULT_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.profile";
const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";
const DEFAULT_PROFILE_API_URL: &str = "https://people.googleapis.com/v1";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Process-wide client configuration.
///
/// Loaded once at startup with [`OAuth2Config::from_env`] and shared read-only
/// by every request.
#[derive(Clone)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    /// Absolute URI the provider redirects back to after consent.
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub revoke_url: String,
    /// Base URL of the People API (`{base}/people/me`).
    pub profile_api_url: String,
    /// Upper bound for each provider round trip.
    pub http_timeout: Duration,
}

impl OAuth2Config {
    /// Configuration pointing at Google's endpoints with the default profile scope.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        origin: &str,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri_for(origin),
            scopes: parse_scopes(DEFAULT_SCOPE),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            revoke_url: DEFAULT_REVOKE_URL.to_string(),
            profile_api_url: DEFAULT_PROFILE_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `OAUTH2_CLIENT_ID` and `OAUTH2_CLIENT_SECRET` are required; every
    /// endpoint can be overridden, which is how tests point the flow at a
    /// local mock provider.
    pub fn from_env() -> Result<Self, OAuth2ConfigError> {
        let client_id = required("OAUTH2_CLIENT_ID")?;
        let client_secret = required("OAUTH2_CLIENT_SECRET")?;
        let origin = optional("ORIGIN", DEFAULT_ORIGIN);

        let http_timeout = match env::var("OAUTH2_HTTP_TIMEOUT_SECS") {
            Ok(v) => v.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                OAuth2ConfigError::InvalidValue("OAUTH2_HTTP_TIMEOUT_SECS", e.to_string())
            })?,
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let scopes = parse_scopes(&optional("OAUTH2_SCOPE", DEFAULT_SCOPE));
        if scopes.is_empty() {
            return Err(OAuth2ConfigError::InvalidValue(
                "OAUTH2_SCOPE",
                "at least one scope is required".to_string(),
            ));
        }

        let config = Self {
            client_id,
            client_secret,
            redirect_uri: redirect_uri_for(&origin),
            scopes,
            auth_url: optional("OAUTH2_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("OAUTH2_TOKEN_URL", DEFAULT_TOKEN_URL),
            revoke_url: optional("OAUTH2_REVOKE_URL", DEFAULT_REVOKE_URL),
            profile_api_url: optional("PROFILE_API_URL", DEFAULT_PROFILE_API_URL),
            http_timeout,
        };

        tracing::debug!("Loaded OAuth2 configuration: {:?}", config);
        Ok(config)
    }
}

// The client secret stays out of logs.
impl fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("revoke_url", &self.revoke_url)
            .field("profile_api_url", &self.profile_api_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn required(key: &'static str) -> Result<String, OAuth2ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(OAuth2ConfigError::MissingVar(key)),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn redirect_uri_for(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), CALLBACK_ROUTE)
}

/// Scopes may be separated by whitespace or `+`, matching how they appear in URLs.
pub(crate) fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == '+')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
