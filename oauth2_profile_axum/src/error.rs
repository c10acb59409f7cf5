use axum::Json;
use http::StatusCode;
use oauth2_profile::{AuthError, MessageResponse, ProfileFetchError, RevocationError, SessionError};

/// Status code and `{msg}` body returned for a failed request
pub type ErrorResponse = (StatusCode, Json<MessageResponse>);

fn error_response(status: StatusCode, msg: impl Into<String>) -> ErrorResponse {
    (status, Json(MessageResponse::new(msg)))
}

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorResponse>;
}

/// Callback failures caused by the request are client errors; a failed token
/// exchange is reported as a bad gateway.
impl<T> IntoResponseError<T> for Result<T, AuthError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let status = match e {
                AuthError::StateMismatch
                | AuthError::CodeAlreadyUsed
                | AuthError::InvalidCallback(_)
                | AuthError::ProviderDenied(_) => StatusCode::BAD_REQUEST,
                AuthError::ExchangeFailed(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::warn!("Authorization failed ({}): {}", status, e);
            error_response(status, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, ProfileFetchError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let status = match e {
                ProfileFetchError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::error!("Profile lookup failed: {}", e);
            error_response(status, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, RevocationError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            tracing::error!("Revocation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            tracing::error!("Session error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}
