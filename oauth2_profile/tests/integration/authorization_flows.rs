use oauth2_profile::{AuthError, PROFILE_ROUTE, SessionState, handle_callback};

use crate::common::{MockProvider, callback_url, start_authorization};

#[tokio::test]
async fn test_callback_stores_complete_credentials() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = SessionState::new();

    let state = start_authorization(&config, &mut session);
    let next = handle_callback(&config, &mut session, &callback_url(&config, &state, "code-1"))
        .await
        .expect("Callback should succeed");

    assert_eq!(next, PROFILE_ROUTE);
    assert!(session.state_token().is_none());

    let creds = session.credentials().expect("Credentials should be stored");
    assert_eq!(creds.token, "access-1");
    assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(creds.token_uri, config.token_url);
    assert_eq!(creds.client_id, config.client_id);
    assert_eq!(creds.client_secret, config.client_secret);
    assert!(!creds.scopes.is_empty());
}

#[tokio::test]
async fn test_replayed_callback_is_rejected() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = SessionState::new();

    let state = start_authorization(&config, &mut session);
    let url = callback_url(&config, &state, "code-1");
    handle_callback(&config, &mut session, &url)
        .await
        .expect("First callback should succeed");
    let stored = session.credentials().cloned();

    let replay = handle_callback(&config, &mut session, &url).await;

    assert!(matches!(replay, Err(AuthError::StateMismatch)));
    assert_eq!(session.credentials().cloned(), stored);
    assert_eq!(provider.with_state(|s| s.issued_tokens), 1);
}

#[tokio::test]
async fn test_reused_code_is_reported() {
    let provider = MockProvider::start().await;
    let config = provider.config();

    let mut first = SessionState::new();
    let state = start_authorization(&config, &mut first);
    handle_callback(&config, &mut first, &callback_url(&config, &state, "code-1"))
        .await
        .expect("First exchange should succeed");

    let mut second = SessionState::new();
    let state = start_authorization(&config, &mut second);
    let result = handle_callback(&config, &mut second, &callback_url(&config, &state, "code-1")).await;

    assert!(matches!(result, Err(AuthError::CodeAlreadyUsed)));
    assert!(second.credentials().is_none());
}

#[tokio::test]
async fn test_state_from_another_session_is_rejected() {
    let provider = MockProvider::start().await;
    let config = provider.config();

    let mut victim = SessionState::new();
    let mut attacker = SessionState::new();
    start_authorization(&config, &mut victim);
    let attacker_state = start_authorization(&config, &mut attacker);

    let result = handle_callback(
        &config,
        &mut victim,
        &callback_url(&config, &attacker_state, "code-1"),
    )
    .await;

    assert!(matches!(result, Err(AuthError::StateMismatch)));
    assert!(victim.credentials().is_none());
    assert_eq!(provider.with_state(|s| s.issued_tokens), 0);
}

#[tokio::test]
async fn test_exchange_with_wrong_client_fails() {
    let provider = MockProvider::start().await;
    let mut config = provider.config();
    config.client_secret = "wrong".to_string();
    let mut session = SessionState::new();

    let state = start_authorization(&config, &mut session);
    let result = handle_callback(&config, &mut session, &callback_url(&config, &state, "code-1")).await;

    assert!(matches!(result, Err(AuthError::ExchangeFailed(_))));
    assert!(session.credentials().is_none());
}

#[tokio::test]
async fn test_unreachable_token_endpoint_fails_exchange() {
    let provider = MockProvider::start().await;
    let mut config = provider.config();
    config.token_url = "http://127.0.0.1:1/token".to_string();
    let mut session = SessionState::new();

    let state = start_authorization(&config, &mut session);
    let result = handle_callback(&config, &mut session, &callback_url(&config, &state, "code-1")).await;

    assert!(matches!(result, Err(AuthError::ExchangeFailed(_))));
}

#[tokio::test]
async fn test_out_of_range_token_lifetime_is_stored_without_expiry() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| s.expires_in = i64::MAX);
    let config = provider.config();
    let mut session = SessionState::new();

    let state = start_authorization(&config, &mut session);
    let next = handle_callback(&config, &mut session, &callback_url(&config, &state, "code-1"))
        .await
        .expect("Callback should succeed");

    assert_eq!(next, PROFILE_ROUTE);
    let creds = session.credentials().expect("Credentials should be stored");
    assert_eq!(creds.token, "access-1");
    assert!(creds.expiry.is_none());
    assert!(!creds.is_expired());
}
