use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// A receivable or liability owed to/by a counterparty, with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Cents,
    pub description: String,
}

impl CreditEntry {
    /// An entry is overdue when its due date is strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// Entries owed to/by a single counterparty. A read-side view, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PayeeGroup {
    pub payee: String,
    pub entries: Vec<CreditEntry>,
}

impl PayeeGroup {
    pub fn has_overdue(&self, now: DateTime<Utc>) -> bool {
        self.entries.iter().any(|e| e.is_overdue(now))
    }

    pub fn total_amount(&self) -> Cents {
        self.entries.iter().map(|e| e.amount).sum()
    }

    fn earliest_due(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.due_date).min()
    }
}

/// Order entries within a group: overdue first, then ascending by due date.
/// Ties on equal due dates keep their original order (stable sort).
pub fn sort_entries(entries: &mut [CreditEntry], now: DateTime<Utc>) {
    entries.sort_by(|a, b| {
        let a_overdue = a.is_overdue(now);
        let b_overdue = b.is_overdue(now);
        b_overdue
            .cmp(&a_overdue)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
}

/// Order groups: any group with an overdue entry comes before groups with
/// none; within each partition, ascending by the group's earliest due date.
/// A group with no entries sorts last within its partition.
pub fn sort_groups(groups: &mut [PayeeGroup], now: DateTime<Utc>) {
    groups.sort_by(|a, b| {
        let a_overdue = a.has_overdue(now);
        let b_overdue = b.has_overdue(now);
        b_overdue.cmp(&a_overdue).then_with(|| {
            match (a.earliest_due(), b.earliest_due()) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        })
    });
}
