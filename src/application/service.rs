use chrono::{DateTime, Utc};

use crate::domain::{Account, AccountKind, Balance, Cents, Transaction, TransactionKind};
use crate::storage::LedgerStore;

use super::AppError;

/// High-level operations over the ledger store. This is the interface any
/// client (CLI, UI, API) talks to; it owns validation and the rules the
/// store itself deliberately leaves to callers, like protecting the main
/// account from deletion and checking that a transaction's account exists.
pub struct LedgerService {
    store: LedgerStore,
}

impl LedgerService {
    /// Create a service over an already-opened store.
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Open (or create) the ledger database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = LedgerStore::init(&db_url).await?;
        Ok(Self::new(store))
    }

    // ========================
    // Account operations
    // ========================

    /// Create a new account with a fresh id and zero balance. The main
    /// account only ever comes from seeding, so `AccountKind::Main` is
    /// rejected here to keep it unique.
    pub async fn create_account(
        &self,
        name: String,
        kind: AccountKind,
    ) -> Result<Account, AppError> {
        if kind == AccountKind::Main {
            return Err(AppError::MainAccountReserved);
        }

        let account = Account::new(name, kind);
        self.store.add_account(account.clone()).await?;
        Ok(account)
    }

    /// List all accounts. Seeds the main account on first use.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.store.get_accounts().await?)
    }

    /// Fresh read of a single account by id.
    pub async fn get_account(&self, account_id: &str) -> Result<Account, AppError> {
        self.store
            .get_accounts()
            .await?
            .into_iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| AppError::AccountNotFound(account_id.to_string()))
    }

    /// The main account, the fallback selection when a previously selected
    /// account no longer exists.
    pub async fn main_account(&self) -> Result<Account, AppError> {
        self.store
            .get_accounts()
            .await?
            .into_iter()
            .find(|a| a.is_main())
            .ok_or_else(|| AppError::AccountNotFound("main".to_string()))
    }

    /// Delete an account and cascade to its transactions. The main account
    /// is protected here; the store itself deletes unconditionally.
    pub async fn delete_account(&self, account_id: &str) -> Result<(), AppError> {
        let account = self.get_account(account_id).await?;
        if account.is_main() {
            return Err(AppError::MainAccountProtected);
        }
        self.store.delete_account(account_id).await?;
        Ok(())
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a new income or expense transaction against an existing
    /// account.
    pub async fn record_transaction(
        &self,
        account_id: &str,
        kind: TransactionKind,
        amount: Cents,
        description: String,
        date: DateTime<Utc>,
        category: Option<String>,
    ) -> Result<Transaction, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        // The store trusts account_id; validate it here.
        let account = self.get_account(account_id).await?;

        let mut transaction = Transaction::new(kind, amount, description, date, account.id);
        if let Some(cat) = category {
            transaction = transaction.with_category(cat);
        }

        self.store.save_transaction(transaction.clone()).await?;
        Ok(transaction)
    }

    /// All transactions in insertion order.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.store.get_transactions().await?)
    }

    /// Most recent transactions by date, default 3.
    pub async fn recent_transactions(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>, AppError> {
        Ok(self.store.get_recent_transactions(limit).await?)
    }

    // ========================
    // Balance operations
    // ========================

    /// The global balance snapshot.
    pub async fn total_balance(&self) -> Result<Balance, AppError> {
        Ok(self.store.get_balance().await?)
    }
}
