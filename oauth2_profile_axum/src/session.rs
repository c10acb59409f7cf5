use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
};
use axum_extra::{TypedHeader, headers};
use http::{HeaderMap, request::Parts};
use oauth2_profile::{SessionError, SessionState, SessionStore, session_id_from_cookies};

use super::error::{ErrorResponse, IntoResponseError};
use super::state::AppState;

/// Session of the requesting browser, available as an Axum extractor
///
/// Extraction looks up the state stored under the verified session cookie.
/// Requests without a valid cookie get an empty state. Handlers mutate
/// [`Session::state`] and call [`Session::commit`] to persist it and obtain
/// the cookie headers for the response.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, extract::State, routing::get};
/// use oauth2_profile_axum::{AppState, Session};
///
/// async fn has_credentials(session: Session) -> String {
///     session.state.credentials().is_some().to_string()
/// }
///
/// fn app(state: AppState) -> Router {
///     Router::new()
///         .route("/status", get(has_credentials))
///         .with_state(state)
/// }
/// ```
#[derive(Debug)]
pub struct Session {
    id: Option<String>,
    pub state: SessionState,
}

impl Session {
    /// Persist the state and return the `Set-Cookie` headers to send back.
    pub async fn commit(&self, store: &SessionStore) -> Result<HeaderMap, SessionError> {
        store.commit(self.id.as_deref(), &self.state).await
    }
}

impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let id = match parts.extract::<TypedHeader<headers::Cookie>>().await {
            Ok(TypedHeader(cookies)) => session_id_from_cookies(&cookies),
            Err(_) => None,
        };

        let state = app_state
            .sessions
            .load(id.as_deref())
            .await
            .into_response_error()?;

        Ok(Self { id, state })
    }
}
