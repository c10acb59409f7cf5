use axum::http::StatusCode;
use oauth2_profile::{
    OAuth2Config, ProfileOutcome, RevocationError, SessionState, clear, get_profile,
    handle_callback, revoke,
};

use crate::common::{MockProvider, callback_url, start_authorization};

async fn signed_in_session(config: &OAuth2Config) -> SessionState {
    let mut session = SessionState::new();
    let state = start_authorization(config, &mut session);
    handle_callback(config, &mut session, &callback_url(config, &state, "code-1"))
        .await
        .expect("Callback should succeed");
    session
}

#[tokio::test]
async fn test_revoke_then_profile_redirects_to_authorize() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let response = revoke(&config, &mut session).await.expect("Revocation should succeed");

    assert_eq!(response.msg, "Credentials successfully revoked.");
    assert_eq!(response.next_url.as_deref(), Some("/"));
    assert!(session.is_empty());
    assert_eq!(provider.with_state(|s| s.revoked_tokens.clone()), vec!["access-1"]);

    let outcome = get_profile(&config, &mut session).await.expect("Lookup should not fail");
    assert!(matches!(outcome, ProfileOutcome::Redirect(location) if location == "/authorize"));
}

#[tokio::test]
async fn test_rejected_revocation_keeps_credentials() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| s.revoke_status = StatusCode::BAD_REQUEST);
    let config = provider.config();
    let mut session = signed_in_session(&config).await;
    let before = session.clone();

    let result = revoke(&config, &mut session).await;

    assert!(matches!(result, Err(RevocationError::ProviderRejected(400))));
    assert_eq!(session, before);
}

#[tokio::test]
async fn test_unreachable_revocation_endpoint() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let unreachable = OAuth2Config {
        revoke_url: "http://127.0.0.1:1/revoke".to_string(),
        ..config
    };
    let result = revoke(&unreachable, &mut session).await;

    assert!(matches!(result, Err(RevocationError::ProviderUnreachable(_))));
    assert!(session.credentials().is_some());
}

#[tokio::test]
async fn test_revoke_without_credentials_does_not_call_provider() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = SessionState::new();

    let response = revoke(&config, &mut session).await.expect("Benign without credentials");

    assert_eq!(response.msg, "no active session");
    assert!(provider.with_state(|s| s.revoked_tokens.is_empty()));
}

#[tokio::test]
async fn test_clear_drops_credentials_without_provider_call() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let response = clear(&mut session);

    assert_eq!(response.msg, "Credentials have been cleared.");
    assert!(session.credentials().is_none());
    assert!(provider.with_state(|s| s.revoked_tokens.is_empty()));

    let outcome = get_profile(&config, &mut session).await.expect("Lookup should not fail");
    assert!(matches!(outcome, ProfileOutcome::Redirect(_)));
}
