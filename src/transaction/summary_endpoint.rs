//! Defines the endpoint for the credit/debit summary of the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::{
    AppState, Error, SessionId,
    transaction::{Summary, TransactionStore},
};

/// The response body for [get_summary_endpoint].
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The totals of the session's transactions.
    pub summary: Summary,
}

/// A route handler for summarising the transactions owned by the request's session.
///
/// **Note**: Expects the session guard to have run, see [crate::session].
pub async fn get_summary_endpoint<S>(
    State(state): State<AppState<S>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let summary = state.transaction_store.summarize(&session_id)?;

    Ok(Json(SummaryResponse { summary }))
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State};
    use rust_decimal::Decimal;

    use crate::{
        Error, SessionId,
        transaction::{
            Summary, TransactionStore,
            summary_endpoint::get_summary_endpoint,
            test_utils::{get_failing_state, get_test_state},
        },
    };

    #[tokio::test]
    async fn summarises_own_transactions() {
        let state = get_test_state();
        let session_id = SessionId::new_random();
        let store = &state.transaction_store;
        store
            .create("salary", Decimal::new(5000, 0), &session_id)
            .unwrap();
        store
            .create("rent", Decimal::new(-1200, 0), &session_id)
            .unwrap();
        store
            .create("not mine", Decimal::new(-1, 0), &SessionId::new_random())
            .unwrap();

        let response = get_summary_endpoint(State(state.clone()), Extension(session_id))
            .await
            .unwrap();

        assert_eq!(
            response.summary,
            Summary {
                credit: Decimal::new(5000, 0),
                debit: Decimal::new(-1200, 0),
                amount: Decimal::new(3800, 0),
            }
        );
    }

    #[tokio::test]
    async fn storage_fault_is_propagated() {
        let result =
            get_summary_endpoint(State(get_failing_state()), Extension(SessionId::new_random()))
                .await;

        assert!(matches!(result, Err(Error::SqlError(_))));
    }
}
