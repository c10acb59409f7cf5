use std::time::Duration;
use subtle::ConstantTimeEq;
use url::Url;

use crate::oauth2::config::OAuth2Config;
use crate::oauth2::errors::AuthError;
use crate::oauth2::types::CallbackParams;

/// Creates the HTTP client used for provider calls.
///
/// - `timeout`: bounds every provider round trip so a stalled provider cannot
///   hold a request open indefinitely.
/// - `pool_idle_timeout`: 90 seconds, the reqwest default, made explicit.
pub(super) fn get_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

pub(super) fn build_authorization_url(
    config: &OAuth2Config,
    state_token: &str,
) -> Result<String, AuthError> {
    let scope = config.scopes.join(" ");
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state_token),
            // offline access makes the provider issue a refresh token
            ("access_type", "offline"),
            ("include_granted_scopes", "true"),
        ],
    )
    .map_err(|e| AuthError::InvalidAuthUrl(e.to_string()))?;

    Ok(url.into())
}

pub(super) fn parse_callback_url(callback_url: &str) -> Result<CallbackParams, AuthError> {
    let url = Url::parse(callback_url).map_err(|e| AuthError::InvalidCallback(e.to_string()))?;

    let mut params = CallbackParams::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => params.code = Some(value.into_owned()),
            "state" => params.state = Some(value.into_owned()),
            "error" => params.error = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok(params)
}

pub(super) fn state_matches(echoed: &str, issued: &str) -> bool {
    bool::from(echoed.as_bytes().ct_eq(issued.as_bytes()))
}
