use serde::{Deserialize, Serialize};

use crate::oauth2::Credentials;
use crate::session::errors::SessionError;

/// Per-browser state carried between requests.
///
/// Holds the anti-forgery token of an in-flight authorization attempt and the
/// credential record obtained once the attempt completes. Handlers receive it
/// explicitly; the HTTP layer loads it before the call and commits it after.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.state_token.is_none() && self.credentials.is_none()
    }

    /// The anti-forgery token issued for the pending authorization attempt.
    pub fn state_token(&self) -> Option<&str> {
        self.state_token.as_deref()
    }

    /// Record a freshly issued anti-forgery token, replacing any earlier one.
    pub fn issue_state_token(&mut self, token: String) {
        self.state_token = Some(token);
    }

    pub(crate) fn take_state_token(&mut self) -> Option<String> {
        self.state_token.take()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Store a credential record. Records lacking the refresh prerequisites are rejected.
    pub fn store_credentials(&mut self, credentials: Credentials) -> Result<(), SessionError> {
        credentials.ensure_complete()?;
        self.state_token = None;
        self.credentials = Some(credentials);
        Ok(())
    }

    /// Drop the credential record and any pending anti-forgery token.
    pub fn clear(&mut self) {
        if self.credentials.is_some() {
            tracing::debug!("Clearing stored credentials");
        }
        self.state_token = None;
        self.credentials = None;
    }
}
