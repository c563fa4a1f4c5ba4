use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde::Serialize;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Client-held session record.
///
/// The whole record lives in an encrypted, http-only cookie; nothing is
/// persisted server-side. The embedded token is independently tamper-evident,
/// the cookie encryption is defense in depth on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub token: String,
}

/// Serialize the record into the jar as the session cookie.
pub fn store(jar: PrivateCookieJar, record: &SessionRecord) -> PrivateCookieJar {
    // serde_json can't fail on this struct
    let value = serde_json::to_string(record).unwrap_or_default();

    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    jar.add(cookie)
}

/// Read the session record back out of the jar.
///
/// Absent, undecryptable, and malformed cookies all read as "no session";
/// a bad cookie must never fail the request.
pub fn load(jar: &PrivateCookieJar) -> Option<SessionRecord> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Attach an immediate-expiry removal cookie, signing the client out.
pub fn clear(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderMap;
    use axum_extra::extract::cookie::Key;

    use super::*;

    fn empty_jar(key: &Key) -> PrivateCookieJar {
        PrivateCookieJar::from_headers(&HeaderMap::new(), key.clone())
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let key = Key::generate();
        let record = SessionRecord {
            user_id: "user-1".to_string(),
            token: "a.b.c".to_string(),
        };

        let jar = store(empty_jar(&key), &record);
        assert_eq!(load(&jar), Some(record));
    }

    #[test]
    fn test_load_without_cookie_is_none() {
        let key = Key::generate();
        assert_eq!(load(&empty_jar(&key)), None);
    }

    #[test]
    fn test_load_rejects_unencrypted_cookie() {
        let key = Key::generate();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session=forged-value".parse().unwrap());
        let jar = PrivateCookieJar::from_headers(&headers, key);

        assert_eq!(load(&jar), None);
    }

    #[test]
    fn test_clear_drops_the_session() {
        let key = Key::generate();
        let record = SessionRecord {
            user_id: "user-1".to_string(),
            token: "a.b.c".to_string(),
        };

        let jar = clear(store(empty_jar(&key), &record));
        assert_eq!(load(&jar), None);
    }

    #[test]
    fn test_session_cookie_flags() {
        let key = Key::generate();
        let record = SessionRecord {
            user_id: "user-1".to_string(),
            token: "a.b.c".to_string(),
        };

        let jar = store(empty_jar(&key), &record);
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.path(), Some("/"));
    }
}
