//! Signed session cookie handling.
//!
//! The cookie value is `<session_id>.<signature>`, where the signature is the
//! base64url HMAC-SHA256 of the session id under `SESSION_SECRET`. Cookies
//! whose signature does not verify are ignored.

use hmac::{Hmac, Mac};
use http::header::{COOKIE, HeaderMap};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::session::config::{
    DEFAULT_MAX_AGE, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE,
    SESSION_SECRET,
};
use crate::session::errors::SessionError;
use crate::utils::{base64url_decode, base64url_encode, header_set_cookie};

type HmacSha256 = Hmac<Sha256>;

fn sign(session_id: &str) -> Result<Vec<u8>, SessionError> {
    let mut mac = HmacSha256::new_from_slice(&SESSION_SECRET)
        .map_err(|e| SessionError::Cookie(e.to_string()))?;
    mac.update(session_id.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

pub(super) fn signed_cookie_value(session_id: &str) -> Result<String, SessionError> {
    Ok(format!("{session_id}.{}", base64url_encode(sign(session_id)?)))
}

fn verify_cookie_value(value: &str) -> Option<String> {
    let (session_id, signature) = value.rsplit_once('.')?;
    let signature = base64url_decode(signature).ok()?;
    let expected = sign(session_id).ok()?;

    if bool::from(expected.ct_eq(&signature)) {
        Some(session_id.to_string())
    } else {
        tracing::warn!("Session cookie signature mismatch, ignoring cookie");
        None
    }
}

/// Extract the verified session id from a typed `Cookie` header.
pub fn session_id_from_cookies(cookies: &headers::Cookie) -> Option<String> {
    cookies
        .get(SESSION_COOKIE_NAME.as_str())
        .and_then(verify_cookie_value)
}

/// Extract the verified session id from raw request headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_name = SESSION_COOKIE_NAME.as_str();

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|s| {
            let (k, v) = s.split_once('=')?;
            (k == cookie_name).then_some(v)
        })
        .and_then(verify_cookie_value)
}

fn cookie_max_age(max_age: u64) -> i64 {
    i64::try_from(max_age).unwrap_or(DEFAULT_MAX_AGE as i64)
}

pub(super) fn set_session_cookie(session_id: &str) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &signed_cookie_value(session_id)?,
        cookie_max_age(*SESSION_COOKIE_MAX_AGE),
        *SESSION_COOKIE_SECURE,
    )?;
    Ok(headers)
}

pub(super) fn expire_session_cookie() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        "value",
        -86400,
        *SESSION_COOKIE_SECURE,
    )?;
    Ok(headers)
}
