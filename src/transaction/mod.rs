//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `Summary` of a session's transactions
//! - The `TransactionStore` trait and its SQLite implementation
//! - Route handlers for creating, listing, fetching, summarising and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod store;
mod summary;
mod summary_endpoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{Transaction, TransactionId, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{delete_transaction_by_segment_endpoint, delete_transaction_endpoint};
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use store::{RowsAffected, SQLiteTransactionStore, TransactionStore};
pub use summary::Summary;
pub use summary_endpoint::get_summary_endpoint;
