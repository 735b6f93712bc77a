use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cents, Transaction};

/// Snapshot of the global balance across all accounts.
///
/// `total` is a cached projection over the transaction collection. It is
/// always fully recomputed from the transactions when they change, never
/// patched incrementally, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub total: Cents,
    pub last_updated: DateTime<Utc>,
}

impl Balance {
    pub fn new(total: Cents) -> Self {
        Self {
            total,
            last_updated: Utc::now(),
        }
    }

    /// The lazy zero value returned when no snapshot was ever persisted.
    pub fn zero() -> Self {
        Self::new(0)
    }
}

/// Sum of signed amounts over all transactions.
pub fn total_balance(transactions: &[Transaction]) -> Cents {
    transactions.iter().map(|t| t.signed_amount()).sum()
}

/// Sum of signed amounts over the transactions of a single account.
pub fn account_balance(account_id: &str, transactions: &[Transaction]) -> Cents {
    transactions
        .iter()
        .filter(|t| t.account_id == account_id)
        .map(|t| t.signed_amount())
        .sum()
}
