//! Routes served by the profile backend

/// Landing page
pub const INDEX_ROUTE: &str = "/";

/// Starts the authorization-code flow
pub const AUTHORIZE_ROUTE: &str = "/authorize";

/// Receives the provider redirect. The registered redirect URI is `ORIGIN` + this path.
pub const CALLBACK_ROUTE: &str = "/oauth2callback";

/// Returns the display name of the signed-in user
pub const PROFILE_ROUTE: &str = "/profile";

/// Revokes the stored token and clears the session
pub const REVOKE_ROUTE: &str = "/revoke";

/// Clears the stored credentials without contacting the provider
pub const CLEAR_ROUTE: &str = "/clear";
