//! Transactions as delivered by the finance API.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Instant, Money};

/// Identifier the finance API assigns to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        TransactionId(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TransactionId {
    fn from(id: u64) -> Self {
        TransactionId(id)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dated monetary movement. Read-only input to aggregation.
///
/// The API names the timestamp `date`; `occurredAt` and `occurred_at` are
/// accepted too.
///
/// # Example
///
/// ```rust
/// use tally_core::types::{Money, Transaction};
/// use rust_decimal_macros::dec;
///
/// let tx: Transaction =
///     serde_json::from_str(r#"{"id": 7, "date": "2024-01-05", "amount": "-12.50"}"#).unwrap();
/// assert_eq!(tx.amount, Money::new(dec!(-12.50)));
/// assert_eq!(tx.occurred_at.to_string(), "2024-01-05T00:00:00Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// API identifier
    pub id: TransactionId,
    /// When the money moved, normalized to UTC
    #[serde(alias = "date", alias = "occurredAt")]
    pub occurred_at: Instant,
    /// Signed amount; negative means money left the account
    pub amount: Money,
}

impl Transaction {
    /// Creates a transaction.
    #[must_use]
    pub fn new(id: u64, occurred_at: Instant, amount: Money) -> Self {
        Self {
            id: TransactionId(id),
            occurred_at,
            amount,
        }
    }
}
