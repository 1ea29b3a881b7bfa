//! Defines the core data models and table schema for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serialize, Serializer, ser::Error as _};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// The unique, server generated identifier of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new random (v4) ID.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TransactionId {
    type Err = Error;

    /// Parse a transaction ID from a UUID string, e.g. "67e55044-10b1-426f-9247-bb680e5fe0c8".
    ///
    /// # Errors
    /// Returns [Error::InvalidTransactionId] if `s` is not a well-formed UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidTransactionId(s.to_owned()))
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        Uuid::parse_str(text)
            .map(Self)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A credit or debit recorded by an anonymous session.
///
/// Positive amounts are credits (money in), negative amounts are debits (money out).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A free-form description of the transaction.
    pub text: String,
    /// The signed amount of money.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
    /// The session that created, and owns, the transaction.
    pub session_id: SessionId,
    /// When the server recorded the transaction.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Serialize a decimal amount as a JSON number.
///
/// Whole amounts are written as integers, e.g. `5000`, everything else as a float.
pub(crate) fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let amount = amount.normalize();

    if amount.scale() == 0 {
        if let Some(whole) = amount.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }

    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(S::Error::custom(format!(
            "amount {amount} cannot be represented as a number"
        ))),
    }
}

/// Convert a JSON number into an exact decimal amount.
///
/// The number's shortest textual form is parsed, so `0.1` becomes exactly `0.1`.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the number does not fit in a [Decimal].
pub(crate) fn parse_amount(number: &serde_json::Number) -> Result<Decimal, Error> {
    let text = number.to_string();

    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| Error::InvalidAmount(text))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Amounts are stored as decimal text so that they round-trip exactly.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                amount TEXT NOT NULL,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_session_id ON transactions(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, text, amount, session_id, created_at` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let text = row.get(1)?;
    let amount = get_amount(row, 2)?;
    let session_id: String = row.get(3)?;
    let created_at = row.get(4)?;

    Ok(Transaction {
        id,
        text,
        amount,
        session_id: SessionId::new(session_id),
        created_at,
    })
}

/// Read the decimal text in column `index` as a [Decimal].
pub(crate) fn get_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str_exact(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
