//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState, Error, session::resolve_or_issue_session, transaction::TransactionStore,
};

/// A route handler for deleting one of the session's transactions, responds with 204 No Content.
///
/// The ID only needs to be a non-empty string. Only transactions owned by the
/// request's session are deleted, anything else is silently left alone. A
/// request without a session cookie is issued a new session, which owns nothing.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Path(transaction_id): Path<String>,
) -> Result<(StatusCode, CookieJar), Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    delete_transaction(&state, jar, transaction_id)
}

/// A route handler for deletes on paths that a static route shadows, e.g.
/// `DELETE /transactions/summary`.
///
/// The last path segment is used as the transaction ID, so the request behaves
/// exactly like [delete_transaction_endpoint].
pub async fn delete_transaction_by_segment_endpoint<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    uri: Uri,
) -> Result<(StatusCode, CookieJar), Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transaction_id = uri.path().rsplit('/').next().unwrap_or_default();

    delete_transaction(&state, jar, transaction_id.to_owned())
}

fn delete_transaction<S>(
    state: &AppState<S>,
    jar: CookieJar,
    transaction_id: String,
) -> Result<(StatusCode, CookieJar), Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    if transaction_id.trim().is_empty() {
        return Err(Error::InvalidTransactionId(transaction_id));
    }

    let (jar, session_id) = resolve_or_issue_session(jar, &state.config.session_cookie);

    let rows_affected = state
        .transaction_store
        .delete_by_id(&transaction_id, &session_id)
        .inspect_err(|error| {
            tracing::error!("Could not delete transaction {transaction_id}: {error}")
        })?;

    if rows_affected == 0 {
        tracing::debug!("No transaction {transaction_id} owned by the session to delete");
    }

    Ok((StatusCode::NO_CONTENT, jar))
}
