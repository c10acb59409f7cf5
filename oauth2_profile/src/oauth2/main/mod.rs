mod core;
mod google;
mod utils;

pub use core::{
    begin_authorization, clear, get_profile, handle_callback, refresh_credentials, revoke,
};
