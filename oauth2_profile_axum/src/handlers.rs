use askama::Template;
use axum::{
    Json,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};

use oauth2_profile::{
    AUTHORIZE_ROUTE, CLEAR_ROUTE, MessageResponse, PROFILE_ROUTE, ProfileOutcome, REVOKE_ROUTE,
    begin_authorization, clear, get_profile, handle_callback, revoke,
};

use super::error::{ErrorResponse, IntoResponseError};
use super::session::Session;
use super::state::AppState;

/// 302 Found carrying the session cookie headers.
fn found(headers: HeaderMap, location: &str) -> Response {
    (StatusCode::FOUND, headers, [(LOCATION, location.to_string())]).into_response()
}

#[derive(Template)]
#[template(path = "index.html.j2")]
struct IndexTemplate<'a> {
    authorize_url: &'a str,
    profile_url: &'a str,
    revoke_url: &'a str,
    clear_url: &'a str,
}

pub(super) async fn index() -> Result<Html<String>, ErrorResponse> {
    let template = IndexTemplate {
        authorize_url: AUTHORIZE_ROUTE,
        profile_url: PROFILE_ROUTE,
        revoke_url: REVOKE_ROUTE,
        clear_url: CLEAR_ROUTE,
    };
    let html = template.render().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new(e.to_string())),
        )
    })?;
    Ok(Html(html))
}

pub(super) async fn authorize(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<Response, ErrorResponse> {
    let auth_url = begin_authorization(&state.config, &mut session.state).into_response_error()?;
    let headers = session
        .commit(&state.sessions)
        .await
        .into_response_error()?;

    Ok(found(headers, &auth_url))
}

/// The provider's redirect target.
///
/// The session is committed on failure too, so a token consumed by a
/// rejected callback stays consumed.
pub(super) async fn oauth2callback(
    State(state): State<AppState>,
    mut session: Session,
    RawQuery(query): RawQuery,
) -> Result<Response, ErrorResponse> {
    let callback_url = match query {
        Some(query) => format!("{}?{}", state.config.redirect_uri, query),
        None => state.config.redirect_uri.clone(),
    };

    let result = handle_callback(&state.config, &mut session.state, &callback_url).await;
    let headers = session
        .commit(&state.sessions)
        .await
        .into_response_error()?;

    Ok(match result.into_response_error() {
        Ok(next) => found(headers, &next),
        Err(err) => (headers, err).into_response(),
    })
}

pub(super) async fn profile(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<Response, ErrorResponse> {
    let result = get_profile(&state.config, &mut session.state).await;
    let headers = session
        .commit(&state.sessions)
        .await
        .into_response_error()?;

    Ok(match result.into_response_error() {
        Ok(ProfileOutcome::Redirect(location)) => found(headers, &location),
        Ok(ProfileOutcome::Profile(view)) => (headers, Json(view)).into_response(),
        Err(err) => (headers, err).into_response(),
    })
}

pub(super) async fn revoke_credentials(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<(HeaderMap, Json<MessageResponse>), ErrorResponse> {
    let message = revoke(&state.config, &mut session.state)
        .await
        .into_response_error()?;
    let headers = session
        .commit(&state.sessions)
        .await
        .into_response_error()?;

    Ok((headers, Json(message)))
}

pub(super) async fn clear_credentials(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<(HeaderMap, Json<MessageResponse>), ErrorResponse> {
    let message = clear(&mut session.state);
    let headers = session
        .commit(&state.sessions)
        .await
        .into_response_error()?;

    Ok((headers, Json(message)))
}
