mod common;
mod config;
mod errors;
mod main;
mod types;

pub use config::SESSION_COOKIE_NAME;
pub use errors::SessionError;
pub use main::{SessionStore, session_id_from_cookies, session_id_from_headers};
pub use types::SessionState;
