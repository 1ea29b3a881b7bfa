//! Session Ledger is a small JSON API for recording monetary transactions.
//!
//! There are no user accounts. Instead, each browser is handed an opaque
//! session token in the `sessionId` cookie the first time it records a
//! transaction, and every transaction it creates belongs to that session.
//! Listing, fetching and summarising transactions only ever sees the data
//! owned by the session in the request's cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod config;
mod db;
mod endpoints;
mod logging;
mod routing;
mod session;
mod transaction;

pub use app_state::AppState;
pub use config::{AppConfig, SessionCookieConfig};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_SIZE, logging_middleware};
pub use routing::build_router;
pub use session::{SESSION_COOKIE, SESSION_DURATION, SessionId};
pub use transaction::{
    RowsAffected, SQLiteTransactionStore, Summary, Transaction, TransactionId, TransactionStore,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body did not have the shape `{"text": string, "amount": number}`.
    ///
    /// Callers should pass in a description of what was wrong with the body.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The amount in the request body could not be represented exactly.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The transaction ID in the request path was missing or malformed.
    #[error("invalid transaction ID \"{0}\"")]
    InvalidTransactionId(String),

    /// A session scoped route was requested without a session cookie.
    #[error("missing session cookie")]
    MissingSession,

    /// Adding up the amounts for a summary exceeded the range of a decimal.
    #[error("the transaction summary overflowed")]
    SummaryOverflow,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    /// The status code to send to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody(_) | Error::InvalidAmount(_) | Error::InvalidTransactionId(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::MissingSession => StatusCode::UNAUTHORIZED,
            Error::SummaryOverflow | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::MissingSession => "Unauthorized.".to_owned(),
            // Server side errors are not intended to be shown to the client.
            error if status.is_server_error() => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Internal server error.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    async fn response_text(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let (status, body) = response_text(Error::InvalidTransactionId("abc".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("abc"), "want body to name the bad ID, got {body}");
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let (status, body) = response_text(Error::MissingSession).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"Unauthorized."}"#);
    }

    #[tokio::test]
    async fn storage_faults_do_not_leak_details() {
        let (status, body) =
            response_text(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Internal server error."}"#);
    }
}
