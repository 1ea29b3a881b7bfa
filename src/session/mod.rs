//! Anonymous session identity.
//!
//! A session is an opaque token stored in the `sessionId` cookie. It is never
//! stored server side as a record of its own; it only exists as the owner of
//! the transactions created with it.

mod cookie;
mod middleware;

use std::fmt::Display;

use serde::Serialize;
use uuid::Uuid;

pub use cookie::{SESSION_COOKIE, SESSION_DURATION};
pub(crate) use cookie::resolve_or_issue_session;
pub(crate) use middleware::session_guard;

/// The opaque token that identifies an anonymous client and owns its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing token, e.g. one read from a cookie.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Mint a new token from a random (v4) UUID.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
