//! Runtime settings for the server that are not tied to a specific store.

use axum::http::{HeaderValue, header::InvalidHeaderValue};

/// Attributes applied to the `sessionId` cookie whenever a new session is issued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCookieConfig {
    /// The `Domain` attribute of the cookie, e.g. ".example.com".
    ///
    /// When `None` the browser scopes the cookie to the host that set it.
    pub domain: Option<String>,
}

/// Settings for the HTTP surface of the app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The single browser origin that may make credentialed cross-origin requests.
    pub allowed_origin: HeaderValue,
    /// How the session cookie is built.
    pub session_cookie: SessionCookieConfig,
}

impl AppConfig {
    /// Create a config allowing `allowed_origin`, e.g. "https://ledger.example.com".
    ///
    /// # Errors
    /// Returns [InvalidHeaderValue] if `allowed_origin` cannot be sent in a header.
    pub fn new(
        allowed_origin: &str,
        cookie_domain: Option<String>,
    ) -> Result<Self, InvalidHeaderValue> {
        let allowed_origin = HeaderValue::from_str(allowed_origin.trim_end_matches('/'))?;

        Ok(Self {
            allowed_origin,
            session_cookie: SessionCookieConfig {
                domain: cookie_domain.filter(|domain| !domain.is_empty()),
            },
        })
    }
}
