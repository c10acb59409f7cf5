use http::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use oauth2_profile::{
    InMemoryCacheStore, ProfileOutcome, SessionStore, get_profile, handle_callback,
    session_id_from_headers,
};

use crate::common::{MockProvider, callback_url, start_authorization};

/// Turn a response's `Set-Cookie` header into the `Cookie` header of the next request.
fn next_request_headers(response_headers: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = response_headers
        .get(SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(';').next())
    {
        headers.insert(COOKIE, HeaderValue::from_str(cookie).expect("Valid cookie"));
    }
    headers
}

#[tokio::test]
async fn test_flow_state_survives_between_requests() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let store = SessionStore::new(Box::new(InMemoryCacheStore::new()));

    // GET /authorize
    let mut session = store.load(None).await.expect("Load should succeed");
    let state = start_authorization(&config, &mut session);
    let response_headers = store.commit(None, &session).await.expect("Commit should succeed");
    let request_headers = next_request_headers(&response_headers);
    let session_id = session_id_from_headers(&request_headers);
    assert!(session_id.is_some());

    // GET /oauth2callback
    let mut session = store.load(session_id.as_deref()).await.expect("Load should succeed");
    assert_eq!(session.state_token(), Some(state.as_str()));
    handle_callback(&config, &mut session, &callback_url(&config, &state, "code-1"))
        .await
        .expect("Callback should succeed");
    store
        .commit(session_id.as_deref(), &session)
        .await
        .expect("Commit should succeed");

    // GET /profile
    let mut session = store.load(session_id.as_deref()).await.expect("Load should succeed");
    let outcome = get_profile(&config, &mut session).await.expect("Profile should load");
    assert!(matches!(outcome, ProfileOutcome::Profile(_)));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let store = SessionStore::new(Box::new(InMemoryCacheStore::new()));

    let mut first = store.load(None).await.expect("Load should succeed");
    let state = start_authorization(&config, &mut first);
    handle_callback(&config, &mut first, &callback_url(&config, &state, "code-1"))
        .await
        .expect("Callback should succeed");
    let first_headers = store.commit(None, &first).await.expect("Commit should succeed");
    let first_id = session_id_from_headers(&next_request_headers(&first_headers));

    let mut second = store.load(None).await.expect("Load should succeed");
    start_authorization(&config, &mut second);
    let second_headers = store.commit(None, &second).await.expect("Commit should succeed");
    let second_id = session_id_from_headers(&next_request_headers(&second_headers));

    assert_ne!(first_id, second_id);
    let reloaded = store.load(second_id.as_deref()).await.expect("Load should succeed");
    assert!(reloaded.credentials().is_none());
    let reloaded = store.load(first_id.as_deref()).await.expect("Load should succeed");
    assert!(reloaded.credentials().is_some());
}
