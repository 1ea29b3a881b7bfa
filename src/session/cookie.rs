//! Defines functions for issuing and reading the session cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::Duration;

use crate::{SessionCookieConfig, SessionId};

/// The name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "sessionId";
/// How long the browser keeps the session cookie.
pub const SESSION_DURATION: Duration = Duration::days(7);

/// Get the session token from the cookie jar, ignoring empty tokens.
pub(crate) fn get_session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed())
        .filter(|token| !token.is_empty())
}

/// Return `existing` unchanged if it is a non-empty token, otherwise mint a
/// new one.
///
/// The returned flag is `true` when the token was newly minted, in which case
/// the caller must send it back to the client with [set_session_cookie].
pub(crate) fn resolve_or_issue(existing: Option<&str>) -> (SessionId, bool) {
    match existing.filter(|token| !token.is_empty()) {
        Some(token) => (SessionId::new(token), false),
        None => (SessionId::new_random(), true),
    }
}

/// Add the session cookie for `session_id` to the cookie jar.
///
/// The cookie is readable from client script and is sent on cross-site
/// credentialed requests, which requires it to be `Secure`.
pub(crate) fn set_session_cookie(
    jar: CookieJar,
    session_id: &SessionId,
    config: &SessionCookieConfig,
) -> CookieJar {
    let mut cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .max_age(SESSION_DURATION)
        .http_only(false)
        .same_site(SameSite::None)
        .secure(true);

    if let Some(domain) = &config.domain {
        cookie = cookie.domain(domain.clone());
    }

    jar.add(cookie)
}

/// Get the session from the request's cookies, issuing a new session and
/// setting its cookie if there is none.
///
/// Returns the (possibly updated) cookie jar, which must be part of the response.
pub(crate) fn resolve_or_issue_session(
    jar: CookieJar,
    config: &SessionCookieConfig,
) -> (CookieJar, SessionId) {
    let (session_id, is_new) = resolve_or_issue(get_session_token(&jar));

    if !is_new {
        return (jar, session_id);
    }

    tracing::debug!("Issuing a new session");
    let jar = set_session_cookie(jar, &session_id, config);

    (jar, session_id)
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        CookieJar,
        cookie::{Cookie, SameSite},
    };

    use crate::{SessionCookieConfig, SessionId};

    use super::{
        SESSION_COOKIE, SESSION_DURATION, get_session_token, resolve_or_issue,
        resolve_or_issue_session, set_session_cookie,
    };

    #[test]
    fn existing_token_is_returned_unchanged() {
        let (session_id, is_new) = resolve_or_issue(Some("abc123"));

        assert_eq!(session_id, SessionId::new("abc123"));
        assert!(!is_new);
    }

    #[test]
    fn missing_token_issues_new_session() {
        let (_, is_new) = resolve_or_issue(None);

        assert!(is_new);
    }

    #[test]
    fn empty_token_issues_new_session() {
        let (session_id, is_new) = resolve_or_issue(Some(""));

        assert!(is_new);
        assert!(!session_id.as_str().is_empty());
    }

    #[test]
    fn session_cookie_has_expected_attributes() {
        let session_id = SessionId::new_random();

        let jar = set_session_cookie(
            CookieJar::new(),
            &session_id,
            &SessionCookieConfig::default(),
        );
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.value(), session_id.as_str());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(SESSION_DURATION));
        assert_eq!(cookie.http_only(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn session_cookie_uses_configured_domain() {
        let config = SessionCookieConfig {
            domain: Some("ledger.example.com".to_owned()),
        };

        let jar = set_session_cookie(CookieJar::new(), &SessionId::new_random(), &config);
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.domain(), Some("ledger.example.com"));
    }

    #[test]
    fn reads_token_from_jar() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "abc123"));

        assert_eq!(get_session_token(&jar), Some("abc123"));
    }

    #[test]
    fn ignores_empty_token_in_jar() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));

        assert_eq!(get_session_token(&jar), None);
    }

    #[test]
    fn resolve_keeps_existing_cookie() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "abc123"));

        let (jar, session_id) = resolve_or_issue_session(jar, &SessionCookieConfig::default());

        assert_eq!(session_id, SessionId::new("abc123"));
        // The jar only tracks changes, so an unchanged cookie keeps its original attributes.
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().max_age(), None);
    }

    #[test]
    fn resolve_issues_cookie_when_missing() {
        let (jar, session_id) =
            resolve_or_issue_session(CookieJar::new(), &SessionCookieConfig::default());

        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), session_id.as_str());
        assert_eq!(cookie.max_age(), Some(SESSION_DURATION));
    }
}
