use std::env;
use std::sync::LazyLock;

const COOKIE_BASE_NAME: &str = "ProfileSessionId";

/// Prefixes browsers only accept on cookies carrying `Secure`.
const SECURE_ONLY_PREFIXES: [&str; 2] = ["__Host-", "__Secure-"];

pub(super) const DEFAULT_MAX_AGE: u64 = 3600;

/// Upper bound browsers apply to `Max-Age` (400 days).
const MAX_AGE_LIMIT: u64 = 400 * 24 * 60 * 60;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    resolve_cookie_name(
        env::var("SESSION_COOKIE_NAME").ok().as_deref(),
        *SESSION_COOKIE_SECURE,
    )
});

pub(super) static SESSION_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref()));

pub(super) static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    parse_secure_flag(env::var("SESSION_COOKIE_SECURE").ok().as_deref())
});

pub(super) static SESSION_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("SESSION_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            tracing::warn!("SESSION_SECRET is not set, using an insecure default");
            "default_secret_key_change_in_production"
                .to_string()
                .into_bytes()
        }
    });

/// `__Host-` cookie by default. Without `Secure` the prefix is dropped, since
/// browsers discard prefixed cookies that lack it.
fn resolve_cookie_name(configured: Option<&str>, secure: bool) -> String {
    let name = configured.filter(|n| !n.is_empty());
    if secure {
        return name.map_or_else(|| format!("__Host-{COOKIE_BASE_NAME}"), str::to_string);
    }

    let Some(name) = name else {
        return COOKIE_BASE_NAME.to_string();
    };
    match SECURE_ONLY_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
    {
        Some(stripped) => {
            tracing::warn!(
                "SESSION_COOKIE_NAME {} requires a Secure cookie, using {} instead",
                name,
                stripped
            );
            stripped.to_string()
        }
        None => name.to_string(),
    }
}

/// Seconds, defaulting to one hour when unset or invalid and capped at 400 days.
fn parse_max_age(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.parse::<u64>().ok())
        .map_or(DEFAULT_MAX_AGE, |secs| secs.min(MAX_AGE_LIMIT))
}

fn parse_secure_flag(value: Option<&str>) -> bool {
    !matches!(
        value.map(|v| v.to_ascii_lowercase()).as_deref(),
        Some("false" | "0" | "no")
    )
}
