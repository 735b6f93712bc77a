use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense entry against one account.
/// Transactions are immutable once recorded; they are only ever removed
/// en masse when their account is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount in cents, always a positive magnitude. The sign is implied
    /// by `kind` and never stored.
    pub amount: Cents,
    pub description: String,
    /// When the transaction occurred. May be backdated or scheduled in
    /// the future.
    pub date: DateTime<Utc>,
    /// The owning account. Must reference an existing account when saved.
    pub account_id: String,
    /// Optional category for reporting (e.g., "groceries").
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Cents,
        description: impl Into<String>,
        date: DateTime<Utc>,
        account_id: impl Into<String>,
    ) -> Self {
        assert!(amount > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            description: description.into(),
            date,
            account_id: account_id.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The amount with its sign applied: positive for income, negative
    /// for expense.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
