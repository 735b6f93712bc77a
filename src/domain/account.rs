use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

/// Id of the account seeded on first access. There is exactly one of these
/// and it cannot be deleted through the service layer.
pub const MAIN_ACCOUNT_ID: &str = "main";
pub const MAIN_ACCOUNT_NAME: &str = "Main Account";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// The default account, seeded automatically. Exactly one exists.
    Main,
    Savings,
    Credit,
    Other,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Main => "main",
            AccountKind::Savings => "savings",
            AccountKind::Credit => "credit",
            AccountKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "main" => Some(AccountKind::Main),
            "savings" => Some(AccountKind::Savings),
            "credit" => Some(AccountKind::Credit),
            "other" => Some(AccountKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An account holds a denormalized balance: the cached sum of the signed
/// amounts of its transactions. The ledger store keeps it in sync on every
/// mutation; it is never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: Cents,
    #[serde(rename = "type")]
    pub kind: AccountKind,
}

impl Account {
    /// Create a new account with a fresh id and zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            balance: 0,
            kind,
        }
    }

    /// The account synthesized when the store is first read while empty.
    pub fn seed_main() -> Self {
        Self {
            id: MAIN_ACCOUNT_ID.to_string(),
            name: MAIN_ACCOUNT_NAME.to_string(),
            balance: 0,
            kind: AccountKind::Main,
        }
    }

    pub fn is_main(&self) -> bool {
        self.kind == AccountKind::Main
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_roundtrip() {
        for kind in [
            AccountKind::Main,
            AccountKind::Savings,
            AccountKind::Credit,
            AccountKind::Other,
        ] {
            let s = kind.as_str();
            let parsed = AccountKind::from_str(s).unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new("Holiday Fund", AccountKind::Savings);
        assert_eq!(account.balance, 0);
        assert!(!account.is_main());
    }

    #[test]
    fn test_seed_main_shape() {
        let main = Account::seed_main();
        assert_eq!(main.id, "main");
        assert_eq!(main.name, "Main Account");
        assert_eq!(main.balance, 0);
        assert!(main.is_main());
    }

    #[test]
    fn test_account_serializes_with_type_field() {
        let main = Account::seed_main();
        let json = serde_json::to_value(&main).unwrap();
        assert_eq!(json["type"], "main");
        assert_eq!(json["id"], "main");
    }
}
