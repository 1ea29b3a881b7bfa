//! Aggregates a session's transactions into credit, debit and net totals.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{Error, transaction::core::serialize_amount};

/// The totals for one session's transactions.
///
/// `amount` always equals `credit + debit` because all three are computed
/// from the same set of amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of all positive amounts, zero if there are none.
    #[serde(serialize_with = "serialize_amount")]
    pub credit: Decimal,
    /// The sum of all negative amounts, zero if there are none.
    #[serde(serialize_with = "serialize_amount")]
    pub debit: Decimal,
    /// The net balance.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Decimal,
}

impl Summary {
    /// Add up `amounts`.
    ///
    /// # Errors
    /// Returns [Error::SummaryOverflow] if any of the totals exceeds the range of a [Decimal].
    pub fn from_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Result<Self, Error> {
        amounts
            .into_iter()
            .try_fold(Summary::default(), |summary, amount| summary.add(amount))
            .ok_or(Error::SummaryOverflow)
    }

    fn add(self, amount: Decimal) -> Option<Self> {
        let (credit, debit) = if amount.is_sign_positive() {
            (self.credit.checked_add(amount)?, self.debit)
        } else {
            (self.credit, self.debit.checked_add(amount)?)
        };

        Some(Self {
            credit,
            debit,
            amount: self.amount.checked_add(amount)?,
        })
    }
}
