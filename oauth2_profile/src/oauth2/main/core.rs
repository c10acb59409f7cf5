use crate::config::{AUTHORIZE_ROUTE, PROFILE_ROUTE};
use crate::oauth2::config::OAuth2Config;
use crate::oauth2::errors::{AuthError, ProfileFetchError, RevocationError};
use crate::oauth2::types::{Credentials, MessageResponse, ProfileOutcome, ProfileView};
use crate::session::SessionState;
use crate::utils::gen_random_string;

use super::google::{exchange_code_for_token, fetch_person, refresh_access_token, revoke_token};
use super::utils::{build_authorization_url, parse_callback_url, state_matches};

/// Start the authorization-code flow.
///
/// Issues a fresh anti-forgery token into `session` (replacing any earlier
/// one) and returns the provider URL the browser should be redirected to.
pub fn begin_authorization(
    config: &OAuth2Config,
    session: &mut SessionState,
) -> Result<String, AuthError> {
    let state_token = gen_random_string(32)?;
    let auth_url = build_authorization_url(config, &state_token)?;

    session.issue_state_token(state_token);
    tracing::info!("Issued anti-forgery token, redirecting to provider");

    Ok(auth_url)
}

/// Complete the flow from the full callback URL the provider redirected to.
///
/// On success the credential record is stored in `session` and the path to
/// continue to is returned. The anti-forgery token is consumed once it has
/// been validated, so replaying the same callback fails.
pub async fn handle_callback(
    config: &OAuth2Config,
    session: &mut SessionState,
    callback_url: &str,
) -> Result<String, AuthError> {
    let params = parse_callback_url(callback_url)?;

    let Some(issued) = session.state_token() else {
        tracing::warn!("Callback received without a pending authorization attempt");
        return Err(AuthError::StateMismatch);
    };
    let echoed = params.state.as_deref().unwrap_or_default();
    if !state_matches(echoed, issued) {
        tracing::warn!("State parameter mismatch in callback");
        return Err(AuthError::StateMismatch);
    }
    session.take_state_token();

    if let Some(error) = params.error {
        tracing::warn!("Provider returned error in callback: {}", error);
        return Err(AuthError::ProviderDenied(error));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AuthError::InvalidCallback("missing code parameter".to_string()))?;

    let token_response = exchange_code_for_token(config, &code).await?;
    let credentials = Credentials::from_token_response(token_response, config);

    session.store_credentials(credentials)?;
    tracing::info!("Authorization completed, credentials stored in session");

    Ok(PROFILE_ROUTE.to_string())
}

/// Look up the display name of the signed-in user.
///
/// Sessions without credentials get [`ProfileOutcome::Redirect`] to the
/// authorization route. An expired access token is refreshed first when a
/// refresh token is available; the record actually used for the call is
/// written back to `session` and returned in the view.
pub async fn get_profile(
    config: &OAuth2Config,
    session: &mut SessionState,
) -> Result<ProfileOutcome, ProfileFetchError> {
    let Some(stored) = session.credentials() else {
        tracing::debug!("No credentials in session, redirecting to authorization");
        return Ok(ProfileOutcome::Redirect(AUTHORIZE_ROUTE.to_string()));
    };
    let mut credentials = stored.clone();

    if credentials.is_expired() {
        if credentials.can_refresh() {
            refresh_credentials(config, &mut credentials).await?;
            session.store_credentials(credentials.clone())?;
        } else {
            tracing::debug!("Access token expired and no refresh token is available");
        }
    }

    let person = fetch_person(config, &credentials.token).await?;
    let name = person
        .names
        .into_iter()
        .next()
        .and_then(|n| n.display_name)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ProfileFetchError::MissingField("names".to_string()))?;

    session.store_credentials(credentials.clone())?;

    Ok(ProfileOutcome::Profile(ProfileView::new(name, credentials)))
}

/// Refresh `credentials` in place using its refresh token.
pub async fn refresh_credentials(
    config: &OAuth2Config,
    credentials: &mut Credentials,
) -> Result<(), ProfileFetchError> {
    tracing::info!("Refreshing expired access token");
    let response = refresh_access_token(config, credentials).await?;
    credentials.apply_refresh(response);
    Ok(())
}

/// Revoke the stored access token at the provider, then clear the session.
///
/// When the provider rejects the revocation the session is left untouched.
pub async fn revoke(
    config: &OAuth2Config,
    session: &mut SessionState,
) -> Result<MessageResponse, RevocationError> {
    let Some(credentials) = session.credentials() else {
        return Ok(MessageResponse::no_active_session());
    };

    revoke_token(config, &credentials.token).await?;
    tracing::info!("Access token revoked");

    clear(session);
    Ok(MessageResponse::revoked())
}

/// Drop the stored credentials. Clearing an empty session is a no-op.
pub fn clear(session: &mut SessionState) -> MessageResponse {
    session.clear();
    MessageResponse::cleared()
}
