//! Defines the endpoint for fetching a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::{
    AppState, Error, SessionId,
    transaction::{Transaction, TransactionId, TransactionStore},
};

/// The response body for [get_transaction_endpoint].
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// The requested transaction, or `null` if the session has no transaction with that ID.
    pub transaction: Option<Transaction>,
}

/// A route handler for fetching one of the session's transactions by ID.
///
/// A missing transaction is not an error, the response holds `null` instead.
///
/// **Note**: Expects the session guard to have run, see [crate::session].
pub async fn get_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Extension(session_id): Extension<SessionId>,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionResponse>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transaction_id: TransactionId = transaction_id.parse()?;

    let transaction = state
        .transaction_store
        .get_one(transaction_id, &session_id)?;

    Ok(Json(TransactionResponse { transaction }))
}
