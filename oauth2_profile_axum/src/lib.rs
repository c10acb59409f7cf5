//! oauth2_profile_axum - Axum integration for oauth2-profile
//!
//! Serves the landing page and the authorization, profile, revoke and clear
//! endpoints on top of the framework-agnostic flow in `oauth2_profile`.
//!
//! ```no_run
//! use oauth2_profile::{OAuth2Config, SessionStore};
//! use oauth2_profile_axum::{AppState, profile_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(OAuth2Config::from_env()?, SessionStore::from_env().await?);
//! let app = profile_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

mod error;
mod handlers;
mod router;
mod session;
mod state;

pub use error::{ErrorResponse, IntoResponseError};
pub use router::{profile_router, profile_router_no_trace};
pub use session::Session;
pub use state::AppState;

// Re-export the core library so applications need a single dependency
pub use oauth2_profile;
