//! Minimal `Cookie` / `Set-Cookie` handling for the session and OAuth state cookies.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Cookie holding the OAuth `state` value between redirect and callback.
pub const STATE_COOKIE: &str = "oauth_state";

/// Lifetime of the OAuth state cookie.
pub const STATE_MAX_AGE_SECS: i64 = 10 * 60;

/// Value of cookie `name` in the request headers, if present.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value for an HttpOnly, `SameSite=Lax` cookie scoped to `/`.
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes cookie `name`.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}
