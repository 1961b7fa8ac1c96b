//! Session identity for quiz state: an opaque id in an HTTP-only cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "placement_sid";

/// Returns the caller's session id, issuing a fresh cookie on first contact.
/// The cookie lives `ttl_secs`, the same lifetime the quiz store gives its entries.
/// The returned jar must be part of the response for a new id to stick.
pub fn ensure_session(jar: CookieJar, ttl_secs: u64) -> (CookieJar, String) {
    if let Some(id) = current_session(&jar) {
        return (jar, id);
    }

    let id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(
            i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        ))
        .build();
    (jar.add(cookie), id)
}

/// Session id from the request, if the caller has one.
pub fn current_session(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
