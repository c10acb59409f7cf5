use axum::http::StatusCode;
use oauth2_profile::{
    OAuth2Config, ProfileFetchError, ProfileOutcome, SessionState, get_profile, handle_callback,
};

use serde_json::json;

use crate::common::{MockProvider, TEST_DISPLAY_NAME, callback_url, start_authorization};

async fn signed_in_session(config: &OAuth2Config) -> SessionState {
    let mut session = SessionState::new();
    let state = start_authorization(config, &mut session);
    handle_callback(config, &mut session, &callback_url(config, &state, "code-1"))
        .await
        .expect("Callback should succeed");
    session
}

#[tokio::test]
async fn test_profile_returns_display_name_and_credentials() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let outcome = get_profile(&config, &mut session).await.expect("Profile should load");

    let ProfileOutcome::Profile(view) = outcome else {
        panic!("Expected a profile, got {outcome:?}");
    };
    assert_eq!(view.name, TEST_DISPLAY_NAME);
    assert_eq!(view.revoke_url, "/revoke");
    assert_eq!(view.creds.token, "access-1");
    assert_eq!(session.credentials(), Some(&view.creds));
    assert_eq!(provider.with_state(|s| s.profile_tokens.clone()), vec!["access-1"]);
}

#[tokio::test]
async fn test_profile_without_names_reports_missing_field() {
    for names in [None, Some(json!([])), Some(json!([{}])), Some(json!([{"givenName": "Ada"}]))] {
        let provider = MockProvider::start().await;
        provider.with_state(|s| s.names = names.clone());
        let config = provider.config();
        let mut session = signed_in_session(&config).await;

        let result = get_profile(&config, &mut session).await;

        assert!(
            matches!(&result, Err(ProfileFetchError::MissingField(f)) if f == "names"),
            "names {names:?} gave {result:?}"
        );
        assert!(session.credentials().is_some());
    }
}

#[tokio::test]
async fn test_profile_rejected_by_provider() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| s.people_status = StatusCode::UNAUTHORIZED);
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let result = get_profile(&config, &mut session).await;

    assert!(matches!(result, Err(ProfileFetchError::ProviderRejected(401))));
}

#[tokio::test]
async fn test_profile_provider_unreachable() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let unreachable = OAuth2Config {
        profile_api_url: "http://127.0.0.1:1/v1".to_string(),
        ..config
    };
    let result = get_profile(&unreachable, &mut session).await;

    assert!(matches!(result, Err(ProfileFetchError::ProviderUnreachable(_))));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_before_profile_call() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| s.expires_in = 0);
    let config = provider.config();
    let mut session = signed_in_session(&config).await;
    assert!(session.credentials().is_some_and(|c| c.is_expired()));

    let outcome = get_profile(&config, &mut session).await.expect("Profile should load");

    let ProfileOutcome::Profile(view) = outcome else {
        panic!("Expected a profile, got {outcome:?}");
    };
    assert_eq!(view.creds.token, "refreshed-1");
    assert_eq!(view.creds.refresh_token.as_deref(), Some("refresh-1"));
    assert!(!view.creds.is_expired());
    assert_eq!(session.credentials().map(|c| c.token.as_str()), Some("refreshed-1"));
    provider.with_state(|s| {
        assert_eq!(s.refresh_count, 1);
        assert_eq!(s.profile_tokens, vec!["refreshed-1"]);
    });
}

#[tokio::test]
async fn test_valid_token_is_not_refreshed() {
    let provider = MockProvider::start().await;
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    get_profile(&config, &mut session).await.expect("Profile should load");
    get_profile(&config, &mut session).await.expect("Profile should load");

    assert_eq!(provider.with_state(|s| s.refresh_count), 0);
}

#[tokio::test]
async fn test_failed_refresh_keeps_stored_credentials() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| s.expires_in = 0);
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let mut broken = session.credentials().cloned().expect("Credentials should be stored");
    broken.refresh_token = Some("revoked-refresh".to_string());
    session.store_credentials(broken.clone()).expect("Credentials are complete");

    let result = get_profile(&config, &mut session).await;

    assert!(matches!(result, Err(ProfileFetchError::RefreshFailed(_))));
    assert_eq!(session.credentials(), Some(&broken));
}

#[tokio::test]
async fn test_out_of_range_refreshed_lifetime_is_stored_without_expiry() {
    let provider = MockProvider::start().await;
    provider.with_state(|s| {
        s.expires_in = 0;
        s.refresh_expires_in = i64::MAX;
    });
    let config = provider.config();
    let mut session = signed_in_session(&config).await;

    let outcome = get_profile(&config, &mut session).await.expect("Profile should load");

    let ProfileOutcome::Profile(view) = outcome else {
        panic!("Expected a profile, got {outcome:?}");
    };
    assert_eq!(view.creds.token, "refreshed-1");
    assert!(view.creds.expiry.is_none());
    assert_eq!(session.credentials(), Some(&view.creds));
}
