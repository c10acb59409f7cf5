//! Router for the profile endpoints

use axum::{Router, routing::get};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use oauth2_profile::{
    AUTHORIZE_ROUTE, CALLBACK_ROUTE, CLEAR_ROUTE, INDEX_ROUTE, PROFILE_ROUTE, REVOKE_ROUTE,
};

use super::handlers::{
    authorize, clear_credentials, index, oauth2callback, profile, revoke_credentials,
};
use super::state::AppState;

/// Create the router serving every profile endpoint
///
/// The endpoints are mounted at the root:
/// - `/` landing page
/// - `/authorize` and `/oauth2callback` for the authorization-code flow
/// - `/profile` for the signed-in user's display name
/// - `/revoke` and `/clear` to drop the stored credentials
pub fn profile_router(state: AppState) -> Router {
    profile_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`profile_router`] without the HTTP tracing middleware.
pub fn profile_router_no_trace(state: AppState) -> Router {
    Router::new()
        .route(INDEX_ROUTE, get(index))
        .route(AUTHORIZE_ROUTE, get(authorize))
        .route(CALLBACK_ROUTE, get(oauth2callback))
        .route(PROFILE_ROUTE, get(profile))
        .route(REVOKE_ROUTE, get(revoke_credentials))
        .route(CLEAR_ROUTE, get(clear_credentials))
        .with_state(state)
}
