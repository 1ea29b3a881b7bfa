use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    AppConfig, AppState, Error, SessionId,
    db::initialize,
    transaction::{
        RowsAffected, SQLiteTransactionStore, Summary, Transaction, TransactionId,
        TransactionStore,
    },
};

pub const TEST_ORIGIN: &str = "https://ledger.example.com";

pub fn get_test_state() -> AppState<SQLiteTransactionStore> {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();

    AppState::new(
        AppConfig::new(TEST_ORIGIN, None).unwrap(),
        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection))),
    )
}

/// A store whose every operation fails as if the database were unreachable.
#[derive(Debug, Clone)]
pub struct FailingStore;

impl FailingStore {
    fn fail<T>() -> Result<T, Error> {
        Err(Error::SqlError(rusqlite::Error::InvalidQuery))
    }
}

impl TransactionStore for FailingStore {
    fn create(&self, _: &str, _: Decimal, _: &SessionId) -> Result<TransactionId, Error> {
        Self::fail()
    }

    fn list_by_session(&self, _: &SessionId) -> Result<Vec<Transaction>, Error> {
        Self::fail()
    }

    fn get_one(&self, _: TransactionId, _: &SessionId) -> Result<Option<Transaction>, Error> {
        Self::fail()
    }

    fn summarize(&self, _: &SessionId) -> Result<Summary, Error> {
        Self::fail()
    }

    fn delete_by_id(&self, _: &str, _: &SessionId) -> Result<RowsAffected, Error> {
        Self::fail()
    }
}

pub fn get_failing_state() -> AppState<FailingStore> {
    AppState::new(AppConfig::new(TEST_ORIGIN, None).unwrap(), FailingStore)
}
