use thiserror::Error;

use crate::session::SessionError;
use crate::utils::UtilError;

/// Failures while completing the authorization callback.
#[derive(Debug, Error, Clone)]
pub enum AuthError {
    /// The echoed state is missing, or differs from the token issued for this session.
    #[error("State parameter does not match the issued anti-forgery token")]
    StateMismatch,

    /// The provider rejected the code as already redeemed or expired.
    #[error("Authorization code has already been used")]
    CodeAlreadyUsed,

    #[error("Token exchange failed: {0}")]
    ExchangeFailed(String),

    /// The provider redirected back with an `error` parameter.
    #[error("Authorization denied by provider: {0}")]
    ProviderDenied(String),

    #[error("Invalid callback: {0}")]
    InvalidCallback(String),

    #[error("Invalid authorization endpoint: {0}")]
    InvalidAuthUrl(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

/// Failures while fetching the profile of the signed-in user.
#[derive(Debug, Error, Clone)]
pub enum ProfileFetchError {
    #[error("Profile response is missing field: {0}")]
    MissingField(String),

    #[error("Profile provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("Profile provider responded with status {0}")]
    ProviderRejected(u16),

    #[error("Malformed profile response: {0}")]
    MalformedResponse(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Failures while revoking the stored token.
#[derive(Debug, Error, Clone)]
pub enum RevocationError {
    #[error("Revocation rejected by provider with status {0}")]
    ProviderRejected(u16),

    #[error("Revocation endpoint unreachable: {0}")]
    ProviderUnreachable(String),
}

#[derive(Debug, Error, Clone)]
pub enum OAuth2ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
