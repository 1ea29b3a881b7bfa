//! Middleware that rejects session scoped requests that have no session cookie.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{Error, SessionId, session::cookie::get_session_token};

/// Check that the request carried a session token.
///
/// # Errors
/// Returns [Error::MissingSession] if `token` is missing or empty.
pub(crate) fn require_session(token: Option<&str>) -> Result<SessionId, Error> {
    match token {
        Some(token) if !token.is_empty() => Ok(SessionId::new(token)),
        _ => Err(Error::MissingSession),
    }
}

/// Middleware function that checks for a session cookie.
/// The session ID is placed into the request and the request executed normally if the cookie is
/// present, otherwise a 401 Unauthorized response is returned without running the handler.
///
/// **Note**: Route handlers can use the function argument `Extension(session_id): Extension<SessionId>` to receive the session ID.
pub(crate) async fn session_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let session_id = match require_session(get_session_token(&jar)) {
        Ok(session_id) => session_id,
        Err(error) => {
            tracing::debug!("Rejecting {} {}: {error}", request.method(), request.uri());
            return error.into_response();
        }
    };

    request.extensions_mut().insert(session_id);

    next.run(request).await
}

#[cfg(test)]
mod session_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;

    use crate::{Error, SESSION_COOKIE, SessionId};

    use super::{require_session, session_guard};

    async fn echo_session(Extension(session_id): Extension<SessionId>) -> String {
        session_id.to_string()
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(echo_session))
            .route_layer(middleware::from_fn(session_guard));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[test]
    fn require_session_accepts_token() {
        let session_id = require_session(Some("abc123")).unwrap();

        assert_eq!(session_id, SessionId::new("abc123"));
    }

    #[test]
    fn require_session_rejects_missing_token() {
        assert!(matches!(require_session(None), Err(Error::MissingSession)));
        assert!(matches!(
            require_session(Some("")),
            Err(Error::MissingSession)
        ));
    }

    #[tokio::test]
    async fn passes_session_to_handler() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(Cookie::new(SESSION_COOKIE, "abc123"))
            .await;

        response.assert_status_ok();
        response.assert_text("abc123");
    }

    #[tokio::test]
    async fn rejects_request_without_cookie() {
        let server = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&serde_json::json!({ "error": "Unauthorized." }));
    }

    #[tokio::test]
    async fn rejects_request_with_empty_cookie() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(Cookie::new(SESSION_COOKIE, ""))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
