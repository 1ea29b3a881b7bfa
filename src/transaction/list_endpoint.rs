//! Defines the endpoint for listing the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    AppState, Error, SessionId,
    transaction::{Transaction, TransactionStore},
};

/// The response body for [list_transactions_endpoint].
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    /// The session's transactions, most recent first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing the transactions owned by the request's session.
///
/// **Note**: Expects the session guard to have run, see [crate::session].
pub async fn list_transactions_endpoint<S>(
    State(state): State<AppState<S>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionsResponse>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transactions = state.transaction_store.list_by_session(&session_id)?;

    Ok(Json(TransactionsResponse { transactions }))
}
