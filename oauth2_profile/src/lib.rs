//! oauth2_profile - Session-bound OAuth2 authorization-code flow
//!
//! This crate drives the authorization-code flow against Google, keeps the
//! resulting credential record in a per-browser server-side session, and
//! uses it to look up the signed-in user's display name through the People
//! API. Tokens can be revoked at the provider or simply dropped.
//!
//! The flow operations take the [`SessionState`] explicitly. An HTTP layer
//! loads it with [`SessionStore::load`] before calling them and persists it
//! with [`SessionStore::commit`] afterwards.

mod config;
mod oauth2;
mod session;
mod storage;
mod utils;

// Re-export the route paths
pub use config::{
    AUTHORIZE_ROUTE, CALLBACK_ROUTE, CLEAR_ROUTE, INDEX_ROUTE, PROFILE_ROUTE, REVOKE_ROUTE,
};

pub use oauth2::{
    AuthError, Credentials, MessageResponse, OAuth2Config, OAuth2ConfigError, ProfileFetchError,
    ProfileOutcome, ProfileView, RevocationError, begin_authorization, clear, get_profile,
    handle_callback, refresh_credentials, revoke,
};

pub use session::{
    SESSION_COOKIE_NAME, SessionError, SessionState, SessionStore, session_id_from_cookies,
    session_id_from_headers,
};

pub use storage::{
    CacheData, CacheStore, InMemoryCacheStore, RedisCacheStore, StorageError,
    cache_store_from_env,
};
