use crate::oauth2::config::OAuth2Config;
use crate::oauth2::errors::{AuthError, ProfileFetchError, RevocationError};
use crate::oauth2::types::{Credentials, Person, TokenErrorResponse, TokenResponse};

use super::utils::get_client;

const PERSON_FIELDS: &str = "names,emailAddresses";

pub(super) async fn exchange_code_for_token(
    config: &OAuth2Config,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let client =
        get_client(config.http_timeout).map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;
    let response = client
        .post(config.token_url.as_str())
        .form(&[
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::debug!("Token exchange failed with status {}", status);
        return Err(match serde_json::from_str::<TokenErrorResponse>(&response_body) {
            Ok(err) if err.error == "invalid_grant" => {
                tracing::warn!(
                    "Authorization code rejected: {}",
                    err.error_description.as_deref().unwrap_or("invalid_grant")
                );
                AuthError::CodeAlreadyUsed
            }
            Ok(err) => AuthError::ExchangeFailed(format!("{status}: {}", err.error)),
            Err(_) => AuthError::ExchangeFailed(status.to_string()),
        });
    }

    serde_json::from_str(&response_body).map_err(|e| AuthError::ExchangeFailed(e.to_string()))
}

/// Trade the refresh token for a new access token at the record's own token endpoint.
pub(super) async fn refresh_access_token(
    config: &OAuth2Config,
    credentials: &Credentials,
) -> Result<TokenResponse, ProfileFetchError> {
    let refresh_token = credentials
        .refresh_token
        .as_deref()
        .ok_or_else(|| ProfileFetchError::RefreshFailed("no refresh token".to_string()))?;

    let client = get_client(config.http_timeout)
        .map_err(|e| ProfileFetchError::RefreshFailed(e.to_string()))?;
    let response = client
        .post(credentials.token_uri.as_str())
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .map_err(|e| ProfileFetchError::RefreshFailed(e.to_string()))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(ProfileFetchError::RefreshFailed(status.to_string()));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| ProfileFetchError::RefreshFailed(e.to_string()))
}

pub(super) async fn fetch_person(
    config: &OAuth2Config,
    access_token: &str,
) -> Result<Person, ProfileFetchError> {
    let client = get_client(config.http_timeout)
        .map_err(|e| ProfileFetchError::ProviderUnreachable(e.to_string()))?;
    let url = format!("{}/people/me", config.profile_api_url.trim_end_matches('/'));

    let response = client
        .get(url)
        .query(&[("personFields", PERSON_FIELDS)])
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| ProfileFetchError::ProviderUnreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Profile request rejected with status {}", status);
        return Err(ProfileFetchError::ProviderRejected(status.as_u16()));
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| ProfileFetchError::ProviderUnreachable(e.to_string()))?;

    serde_json::from_str(&response_body)
        .map_err(|e| ProfileFetchError::MalformedResponse(e.to_string()))
}

pub(super) async fn revoke_token(config: &OAuth2Config, token: &str) -> Result<(), RevocationError> {
    let client = get_client(config.http_timeout)
        .map_err(|e| RevocationError::ProviderUnreachable(e.to_string()))?;
    let response = client
        .post(config.revoke_url.as_str())
        .form(&[("token", token)])
        .send()
        .await
        .map_err(|e| RevocationError::ProviderUnreachable(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::OK => Ok(()),
        status => {
            tracing::warn!("Token revocation rejected with status {}", status);
            Err(RevocationError::ProviderRejected(status.as_u16()))
        }
    }
}
