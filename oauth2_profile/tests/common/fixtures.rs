use oauth2_profile::{OAuth2Config, SessionState, begin_authorization};
use url::Url;

/// Start an authorization attempt and return the state echoed in the provider URL.
pub fn start_authorization(config: &OAuth2Config, session: &mut SessionState) -> String {
    let auth_url = begin_authorization(config, session).expect("Failed to begin authorization");
    Url::parse(&auth_url)
        .expect("Authorization URL should be absolute")
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .expect("Authorization URL should carry a state parameter")
}

/// The URL the provider would redirect the browser to after consent.
pub fn callback_url(config: &OAuth2Config, state: &str, code: &str) -> String {
    let mut url = Url::parse(&config.redirect_uri).expect("Redirect URI should be absolute");
    url.query_pairs_mut()
        .append_pair("state", state)
        .append_pair("code", code)
        .append_pair("scope", "https://www.googleapis.com/auth/userinfo.profile");
    url.into()
}
