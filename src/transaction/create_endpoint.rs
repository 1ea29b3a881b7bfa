//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    AppState, Error,
    session::resolve_or_issue_session,
    transaction::{TransactionStore, core::parse_amount},
};

/// The JSON body for creating a transaction.
///
/// Fields other than `text` and `amount` are ignored.
#[derive(Debug, Deserialize)]
pub struct TransactionBody {
    /// Text detailing the transaction.
    pub text: String,
    /// The signed amount, positive for a credit and negative for a debit.
    ///
    /// Kept as a JSON number until it is converted to an exact decimal.
    pub amount: serde_json::Number,
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 Created and the session token as the body. If the request
/// had no session cookie, a new session is issued and its cookie is set on the
/// response.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    body: Result<Json<TransactionBody>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, String), Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Json(body) = body.map_err(|rejection| Error::InvalidBody(rejection.body_text()))?;
    let amount = parse_amount(&body.amount)?;

    let (jar, session_id) = resolve_or_issue_session(jar, &state.config.session_cookie);

    let id = state
        .transaction_store
        .create(&body.text, amount, &session_id)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    tracing::debug!("Created transaction {id}");

    Ok((StatusCode::CREATED, jar, session_id.to_string()))
}
