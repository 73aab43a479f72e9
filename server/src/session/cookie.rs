//! Session cookie header handling

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use super::SESSION_TTL_DAYS;

pub const SESSION_COOKIE: &str = "taskmatrix.sid";

/// Session id from the request's `Cookie` headers
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id.to_string())
        .filter(|id| !id.is_empty())
}

fn build(value: &str, max_age_secs: i64, secure: bool) -> HeaderValue {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    // Session ids are hex, so the header is always valid ASCII
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value for a live session
pub fn session_cookie(session_id: &str, secure: bool) -> HeaderValue {
    build(session_id, SESSION_TTL_DAYS * 24 * 60 * 60, secure)
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_cookie(secure: bool) -> HeaderValue {
    build("", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; taskmatrix.sid=abc123; x=1"));
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc123"));

        headers.insert(COOKIE, HeaderValue::from_static("taskmatrix.sid="));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc", false);
        assert_eq!(
            cookie.to_str().unwrap(),
            "taskmatrix.sid=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=2592000"
        );
        assert!(session_cookie("abc", true).to_str().unwrap().ends_with("; Secure"));
        assert!(clear_cookie(false).to_str().unwrap().contains("Max-Age=0"));
    }
}
