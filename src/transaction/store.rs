//! Defines the transaction store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error, SessionId,
    transaction::{
        Summary,
        core::{Transaction, TransactionId, get_amount, map_transaction_row},
    },
};

/// The number of rows removed by a delete.
pub type RowsAffected = usize;

/// Handles the creation and retrieval of session owned transactions.
///
/// Every read is scoped to the session passed in; a transaction owned by
/// another session behaves as if it did not exist.
pub trait TransactionStore {
    /// Record a new transaction for `session_id` and return its generated ID.
    fn create(
        &self,
        text: &str,
        amount: Decimal,
        session_id: &SessionId,
    ) -> Result<TransactionId, Error>;

    /// Get all of the transactions owned by `session_id`, most recent first.
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error>;

    /// Get the transaction with `id` if it is owned by `session_id`.
    fn get_one(
        &self,
        id: TransactionId,
        session_id: &SessionId,
    ) -> Result<Option<Transaction>, Error>;

    /// Add up the credits, debits and net amount of the transactions owned by `session_id`.
    fn summarize(&self, session_id: &SessionId) -> Result<Summary, Error>;

    /// Delete the transaction with `id` if it is owned by `session_id`.
    ///
    /// Deleting a transaction that does not exist, or that another session
    /// owns, is not an error and affects zero rows.
    fn delete_by_id(&self, id: &str, session_id: &SessionId) -> Result<RowsAffected, Error>;
}

/// Stores transactions in a SQLite database.
///
/// The database must have been set up with [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert a transaction with a new random ID, stamped with the current time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn create(
        &self,
        text: &str,
        amount: Decimal,
        session_id: &SessionId,
    ) -> Result<TransactionId, Error> {
        let id = TransactionId::new_random();

        self.lock()?.execute(
            "INSERT INTO transactions (id, text, amount, session_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                id,
                text,
                amount.to_string(),
                session_id.as_str(),
                OffsetDateTime::now_utc(),
            ),
        )?;

        Ok(id)
    }

    /// Query for the session's transactions in the database.
    ///
    /// Transactions with the same timestamp are returned in reverse insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, text, amount, session_id, created_at FROM transactions
                 WHERE session_id = :session_id
                 ORDER BY created_at DESC, rowid DESC",
            )?
            .query_map(&[(":session_id", session_id.as_str())], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id` and owner.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_one(
        &self,
        id: TransactionId,
        session_id: &SessionId,
    ) -> Result<Option<Transaction>, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, text, amount, session_id, created_at FROM transactions
                 WHERE id = ?1 AND session_id = ?2",
            )?
            .query_row((id, session_id.as_str()), map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    /// Sum the session's amounts.
    ///
    /// The amounts are read with a single query so the totals are computed
    /// from one snapshot of the session's transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::SummaryOverflow] if a total does not fit in a [Decimal],
    /// - or [Error::SqlError] if there is some SQL error.
    fn summarize(&self, session_id: &SessionId) -> Result<Summary, Error> {
        let amounts = self
            .lock()?
            .prepare("SELECT amount FROM transactions WHERE session_id = :session_id")?
            .query_map(&[(":session_id", session_id.as_str())], |row| {
                get_amount(row, 0)
            })?
            .collect::<Result<Vec<Decimal>, rusqlite::Error>>()?;

        Summary::from_amounts(amounts)
    }

    /// Delete the session's transaction with `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn delete_by_id(&self, id: &str, session_id: &SessionId) -> Result<RowsAffected, Error> {
        self.lock()?
            .execute(
                "DELETE FROM transactions WHERE id = ?1 AND session_id = ?2",
                (id, session_id.as_str()),
            )
            .map_err(|error| error.into())
    }
}
