use std::sync::Arc;

use oauth2_profile::{OAuth2Config, SessionStore};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OAuth2Config>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: OAuth2Config, sessions: SessionStore) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
        }
    }
}
