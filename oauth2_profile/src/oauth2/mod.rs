mod config;
mod errors;
mod main;
mod types;

pub use config::OAuth2Config;
pub use errors::{AuthError, OAuth2ConfigError, ProfileFetchError, RevocationError};
pub use main::{
    begin_authorization, clear, get_profile, handle_callback, refresh_credentials, revoke,
};
pub use types::{Credentials, MessageResponse, ProfileOutcome, ProfileView};
