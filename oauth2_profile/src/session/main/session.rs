use http::header::HeaderMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::config::SESSION_COOKIE_MAX_AGE;
use crate::session::errors::SessionError;
use crate::session::types::SessionState;
use crate::storage::{CacheData, CacheStore, cache_store_from_env};
use crate::utils::gen_random_string;

use super::cookie::{expire_session_cookie, set_session_cookie};

const SESSION_PREFIX: &str = "session";

/// Server-side session storage keyed by the id carried in the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<Mutex<Box<dyn CacheStore>>>,
    ttl: u64,
}

impl SessionStore {
    pub fn new(cache: Box<dyn CacheStore>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            ttl: *SESSION_COOKIE_MAX_AGE,
        }
    }

    /// Build a store on the backend selected by `GENERIC_CACHE_STORE_TYPE`.
    pub async fn from_env() -> Result<Self, SessionError> {
        Ok(Self::new(cache_store_from_env().await?))
    }

    /// Load the state for `session_id`, or an empty state for unknown or absent sessions.
    pub async fn load(&self, session_id: Option<&str>) -> Result<SessionState, SessionError> {
        let Some(session_id) = session_id else {
            return Ok(SessionState::new());
        };

        let cached = self
            .cache
            .lock()
            .await
            .get(SESSION_PREFIX, session_id)
            .await?;

        match cached {
            Some(data) => data.try_into(),
            None => {
                tracing::debug!("No stored session for presented cookie");
                Ok(SessionState::new())
            }
        }
    }

    /// Persist `state` and return the cookie headers the response must carry.
    ///
    /// A non-empty state is written under the existing session id, or under a
    /// new one when the request carried none. An empty state removes the
    /// stored entry and expires the cookie.
    pub async fn commit(
        &self,
        session_id: Option<&str>,
        state: &SessionState,
    ) -> Result<HeaderMap, SessionError> {
        if state.is_empty() {
            return match session_id {
                Some(session_id) => {
                    self.destroy(session_id).await?;
                    expire_session_cookie()
                }
                None => Ok(HeaderMap::new()),
            };
        }

        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => {
                tracing::debug!("Starting new session");
                gen_random_string(32)?
            }
        };

        let data = CacheData::try_from(state)?;
        self.cache
            .lock()
            .await
            .put_with_ttl(SESSION_PREFIX, &session_id, data, self.ttl as usize)
            .await?;

        set_session_cookie(&session_id)
    }

    /// Remove the stored state for `session_id`. Missing sessions are not an error.
    pub async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        self.cache
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await?;
        Ok(())
    }
}
