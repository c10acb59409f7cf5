mod cookie;
mod session;

pub use cookie::{session_id_from_cookies, session_id_from_headers};
pub use session::SessionStore;
