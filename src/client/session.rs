//! Session state and the request/response hooks that carry it
//!
//! The CxRestAPI server authenticates with cookies plus a CSRF token that
//! is delivered as a cookie and must be echoed back in a request header.
//! [`SessionState::apply`] runs before every request is sent and
//! [`SessionState::absorb`] runs after every response is received.

use log::debug;
use reqwest::RequestBuilder;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};

/// Header (and cookie name) carrying the CSRF token
pub const CSRF_TOKEN_HEADER: &str = "CXCSRFToken";

/// Cookies and CSRF token captured from server responses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    cookies: Vec<(String, String)>,
    csrf_token: Option<String>,
}

impl SessionState {
    /// Forget all cookies and the CSRF token
    pub fn clear(&mut self) {
        self.cookies.clear();
        self.csrf_token = None;
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Value for the outgoing `Cookie` header, if any cookies are held
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Pre-send hook: attach session cookies and the CSRF token
    pub fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(cookie) = self.cookie_header() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_TOKEN_HEADER, token);
        }
        request
    }

    /// Post-receive hook: merge `Set-Cookie` headers into the session
    pub fn absorb(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                debug!("Skipping non-ASCII Set-Cookie header");
                continue;
            };
            match parse_set_cookie(raw) {
                Some((name, value)) => self.store(name, value),
                None => debug!("Skipping malformed Set-Cookie header"),
            }
        }
    }

    /// Add a cookie, replacing any cookie of the same name in place
    pub fn store(&mut self, name: String, value: String) {
        if name == CSRF_TOKEN_HEADER {
            self.csrf_token = Some(value.clone());
        }

        debug!("Session cookie received: {}", name);
        match self.cookies.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.cookies.push((name, value)),
        }
    }
}

/// Extract `name=value` from a `Set-Cookie` header, ignoring attributes
fn parse_set_cookie(raw: &str) -> Option<(String, String)> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    Some((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn set_cookies(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_parse_set_cookie_ignores_attributes() {
        assert_eq!(
            parse_set_cookie("ASP.NET_SessionId=abc123; path=/; HttpOnly"),
            Some(("ASP.NET_SessionId".to_string(), "abc123".to_string()))
        );
        assert_eq!(
            parse_set_cookie("token=\"quoted\""),
            Some(("token".to_string(), "quoted".to_string()))
        );
        assert_eq!(
            parse_set_cookie("empty="),
            Some(("empty".to_string(), String::new()))
        );
    }

    #[test]
    fn test_parse_set_cookie_rejects_malformed() {
        assert_eq!(parse_set_cookie("no-equals-sign"), None);
        assert_eq!(parse_set_cookie("=value"), None);
    }

    #[test]
    fn test_empty_session_has_no_headers() {
        let session = SessionState::default();
        assert!(session.cookie_header().is_none());
        assert!(session.csrf_token().is_none());
    }

    #[test]
    fn test_absorb_captures_csrf_token() {
        let mut session = SessionState::default();
        session.absorb(&set_cookies(&[
            "cxCookie=session-1; path=/",
            "CXCSRFToken=token-1; path=/",
        ]));

        assert_eq!(session.csrf_token(), Some("token-1"));
        assert_eq!(
            session.cookie_header().as_deref(),
            Some("cxCookie=session-1; CXCSRFToken=token-1")
        );
    }

    #[test]
    fn test_absorb_accumulates_across_responses() {
        let mut session = SessionState::default();
        session.absorb(&set_cookies(&["a=1"]));
        session.absorb(&set_cookies(&["b=2"]));

        assert_eq!(session.cookie_header().as_deref(), Some("a=1; b=2"));
    }

    #[test]
    fn test_absorb_replaces_same_named_cookie() {
        let mut session = SessionState::default();
        session.absorb(&set_cookies(&["a=1", "b=2", "CXCSRFToken=old"]));
        session.absorb(&set_cookies(&["a=9", "CXCSRFToken=new"]));

        assert_eq!(
            session.cookies(),
            &[
                ("a".to_string(), "9".to_string()),
                ("b".to_string(), "2".to_string()),
                ("CXCSRFToken".to_string(), "new".to_string()),
            ]
        );
        assert_eq!(session.csrf_token(), Some("new"));
    }

    #[test]
    fn test_absorb_without_cookies_keeps_state() {
        let mut session = SessionState::default();
        session.store("a".to_string(), "1".to_string());
        session.absorb(&HeaderMap::new());

        assert_eq!(session.cookie_header().as_deref(), Some("a=1"));
    }

    #[test]
    fn test_clear_resets_cookies_and_token() {
        let mut session = SessionState::default();
        session.absorb(&set_cookies(&["a=1", "CXCSRFToken=t"]));
        session.clear();

        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_apply_sets_request_headers() {
        let mut session = SessionState::default();
        session.absorb(&set_cookies(&["a=1", "CXCSRFToken=t"]));

        let http = reqwest::Client::new();
        let request = session
            .apply(http.get("http://localhost/CxRestAPI/scans/1"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[COOKIE], "a=1; CXCSRFToken=t");
        assert_eq!(request.headers()[CSRF_TOKEN_HEADER], "t");
    }

    #[test]
    fn test_apply_without_session_adds_nothing() {
        let session = SessionState::default();
        let http = reqwest::Client::new();
        let request = session
            .apply(http.get("http://localhost/CxRestAPI/scans/1"))
            .build()
            .unwrap();

        assert!(request.headers().get(COOKIE).is_none());
        assert!(request.headers().get(CSRF_TOKEN_HEADER).is_none());
    }
}
