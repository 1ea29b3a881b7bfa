//! Implements a struct that holds the state of the REST server.

use crate::{AppConfig, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    /// Settings for CORS and the session cookie.
    pub config: AppConfig,

    /// The store for managing session owned [transactions](crate::Transaction).
    pub transaction_store: S,
}

impl<S> AppState<S>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    /// Create a new [AppState].
    pub fn new(config: AppConfig, transaction_store: S) -> Self {
        Self {
            config,
            transaction_store,
        }
    }
}
