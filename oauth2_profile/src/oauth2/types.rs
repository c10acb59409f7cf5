use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::{OAuth2Config, parse_scopes};
use crate::config::{AUTHORIZE_ROUTE, INDEX_ROUTE, REVOKE_ROUTE};
use crate::session::SessionError;

/// Tokens are treated as expired this long before their stated expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Token material needed to act on behalf of the signed-in user.
///
/// Serialized field names follow the shape the `/profile` endpoint reports
/// back as `creds`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Access token
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credentials {
    pub(crate) fn from_token_response(response: TokenResponse, config: &OAuth2Config) -> Self {
        let scopes = match response.scope.as_deref() {
            Some(scope) if !scope.trim().is_empty() => parse_scopes(scope),
            _ => config.scopes.clone(),
        };

        Self {
            token: response.access_token,
            refresh_token: response.refresh_token,
            token_uri: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes,
            expiry: response.expires_in.and_then(expiry_after),
        }
    }

    /// Rotate the access token after a refresh. The refresh token is kept
    /// unless the provider issued a new one.
    pub(crate) fn apply_refresh(&mut self, response: TokenResponse) {
        self.token = response.access_token;
        if let Some(refresh_token) = response.refresh_token {
            self.refresh_token = Some(refresh_token);
        }
        if let Some(scope) = response.scope.as_deref().filter(|s| !s.trim().is_empty()) {
            self.scopes = parse_scopes(scope);
        }
        self.expiry = response.expires_in.and_then(expiry_after);
    }

    /// An access token is only stored together with what is needed to refresh it.
    pub(crate) fn ensure_complete(&self) -> Result<(), SessionError> {
        if self.token.is_empty() {
            return Err(SessionError::IncompleteCredentials("token"));
        }
        if self.token_uri.is_empty() {
            return Err(SessionError::IncompleteCredentials("token_uri"));
        }
        if self.client_id.is_empty() {
            return Err(SessionError::IncompleteCredentials("client_id"));
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(expiry) => expiry <= Utc::now() + Duration::seconds(EXPIRY_SKEW_SECS),
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Absolute expiry for an `expires_in` lifetime. Lifetimes outside the range
/// `chrono` can represent are treated as carrying no expiry.
fn expiry_after(secs: i64) -> Option<DateTime<Utc>> {
    let expiry = Duration::try_seconds(secs).and_then(|d| Utc::now().checked_add_signed(d));
    if expiry.is_none() {
        tracing::warn!("Ignoring out-of-range expires_in: {}", secs);
    }
    expiry
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[redacted]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[redacted]"))
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Successful response of the token endpoint, for both grant types.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) expires_in: Option<i64>,
    #[serde(default)]
    pub(crate) refresh_token: Option<String>,
    #[serde(default)]
    pub(crate) scope: Option<String>,
}

/// Error body of the token endpoint (RFC 6749 section 5.2).
#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorResponse {
    pub(crate) error: String,
    #[serde(default)]
    pub(crate) error_description: Option<String>,
}

/// Parameters the provider appends to the redirect URI.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CallbackParams {
    pub(crate) code: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) error: Option<String>,
}

/// Subset of a People API `Person` resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Person {
    #[serde(default)]
    pub(crate) names: Vec<PersonName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonName {
    #[serde(default)]
    pub(crate) display_name: Option<String>,
}

/// Body returned by `/profile` for an authenticated session.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub revoke_url: String,
    /// The credential record actually used for the profile call.
    pub creds: Credentials,
}

impl ProfileView {
    pub(crate) fn new(name: String, creds: Credentials) -> Self {
        Self {
            name,
            revoke_url: REVOKE_ROUTE.to_string(),
            creds,
        }
    }
}

/// Outcome of a profile lookup that did not fail.
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    /// No credentials in the session; send the browser to this location.
    Redirect(String),
    Profile(ProfileView),
}

/// `{msg, next_url}` style body shared by `/revoke`, `/clear` and error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            next_url: None,
            authorization_url: None,
        }
    }

    pub(crate) fn cleared() -> Self {
        Self {
            next_url: Some(INDEX_ROUTE.to_string()),
            ..Self::new("Credentials have been cleared.")
        }
    }

    pub(crate) fn revoked() -> Self {
        Self {
            next_url: Some(INDEX_ROUTE.to_string()),
            ..Self::new("Credentials successfully revoked.")
        }
    }

    pub(crate) fn no_active_session() -> Self {
        Self {
            authorization_url: Some(AUTHORIZE_ROUTE.to_string()),
            ..Self::new("no active session")
        }
    }
}
