use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{total_balance, Account, Balance, Cents, Transaction};

use super::KvStore;

/// Fixed keys for the three ledger collections.
pub const ACCOUNTS_KEY: &str = "accounts";
pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BALANCE_KEY: &str = "balance";

/// Default number of entries returned by `get_recent_transactions`.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Single source of truth for accounts, transactions and the derived
/// balance snapshot.
///
/// After every mutating call the store guarantees:
/// - each account's `balance` equals the sum of signed amounts of its
///   transactions, and
/// - the global `Balance.total` equals the sum over all transactions.
///
/// The global total is always recomputed from the full transaction list,
/// never patched incrementally. Multi-key updates go through a single
/// SQLite transaction, so no partially-written ledger state is observable.
///
/// Operations are not safe to run concurrently with each other: each one
/// is a read-modify-write over whole collection snapshots, and the later
/// write wins. Callers serialize their own mutations (single-writer).
pub struct LedgerStore {
    kv: KvStore,
}

impl LedgerStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Open (or create) a ledger at the given SQLite path.
    pub async fn init(database_url: &str) -> Result<Self> {
        let kv = KvStore::init(database_url).await?;
        Ok(Self::new(kv))
    }

    // ========================
    // Account operations
    // ========================

    /// All accounts, insertion order preserved.
    ///
    /// On the first call ever against an empty store, synthesizes and
    /// persists the single `main` account before returning it, so repeated
    /// calls observe the same collection.
    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        match self.kv.get(ACCOUNTS_KEY).await? {
            Some(doc) => parse_document(&doc, "accounts"),
            None => {
                let seeded = vec![Account::seed_main()];
                self.write_accounts(&seeded).await?;
                debug!("seeded main account into empty store");
                Ok(seeded)
            }
        }
    }

    /// Append a fully-formed account. The caller supplies id, name and
    /// kind; the balance is expected to start at 0.
    pub async fn add_account(&self, account: Account) -> Result<()> {
        let mut accounts = self.get_accounts().await?;
        accounts.push(account);
        self.write_accounts(&accounts).await
    }

    /// Remove the account with the given id along with every transaction
    /// referencing it, then recompute the global balance from the
    /// survivors. All three records are persisted atomically.
    ///
    /// An unknown id removes nothing but still rewrites a consistent
    /// snapshot.
    pub async fn delete_account(&self, account_id: &str) -> Result<()> {
        let mut accounts = self.get_accounts().await?;
        accounts.retain(|a| a.id != account_id);

        let transactions = self.get_transactions().await?;
        let before = transactions.len();
        let surviving: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| t.account_id != account_id)
            .collect();
        debug!(
            account_id,
            removed = before - surviving.len(),
            "cascading account delete"
        );

        let balance = Balance::new(total_balance(&surviving));
        self.kv
            .set_many(&[
                (ACCOUNTS_KEY, serialize_document(&accounts)?),
                (TRANSACTIONS_KEY, serialize_document(&surviving)?),
                (BALANCE_KEY, serialize_document(&balance)?),
            ])
            .await
    }

    /// Add `delta` to the matching account's cached balance in place.
    /// No-op if the id is not found. Normally reached through
    /// `save_transaction` rather than called directly.
    pub async fn update_account_balance(&self, account_id: &str, delta: Cents) -> Result<()> {
        let mut accounts = self.get_accounts().await?;
        for account in accounts.iter_mut() {
            if account.id == account_id {
                account.balance += delta;
            }
        }
        self.write_accounts(&accounts).await
    }

    // ========================
    // Transaction operations
    // ========================

    /// Append a transaction and bring both derived balances up to date:
    /// the owning account's cached balance gets the signed amount applied,
    /// and the global total is recomputed over the full transaction list.
    /// All three records are persisted in one atomic write.
    ///
    /// The store does not check that `account_id` references an existing
    /// account; that is the caller's responsibility.
    pub async fn save_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut transactions = self.get_transactions().await?;
        let delta = transaction.signed_amount();
        let account_id = transaction.account_id.clone();
        transactions.push(transaction);

        let mut accounts = self.get_accounts().await?;
        for account in accounts.iter_mut() {
            if account.id == account_id {
                account.balance += delta;
            }
        }

        let balance = Balance::new(total_balance(&transactions));
        self.kv
            .set_many(&[
                (TRANSACTIONS_KEY, serialize_document(&transactions)?),
                (ACCOUNTS_KEY, serialize_document(&accounts)?),
                (BALANCE_KEY, serialize_document(&balance)?),
            ])
            .await
    }

    /// All transactions in insertion order.
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        match self.kv.get(TRANSACTIONS_KEY).await? {
            Some(doc) => parse_document(&doc, "transactions"),
            None => Ok(Vec::new()),
        }
    }

    /// Transactions sorted by date descending, truncated to `limit`
    /// (default 3). Ties on equal dates keep insertion order.
    pub async fn get_recent_transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let mut transactions = self.get_transactions().await?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(limit.unwrap_or(DEFAULT_RECENT_LIMIT));
        Ok(transactions)
    }

    // ========================
    // Balance operations
    // ========================

    /// The persisted balance snapshot, or a lazy zero value if none was
    /// ever written. The zero value is not persisted.
    pub async fn get_balance(&self) -> Result<Balance> {
        match self.kv.get(BALANCE_KEY).await? {
            Some(doc) => parse_document(&doc, "balance"),
            None => Ok(Balance::zero()),
        }
    }

    /// Overwrite the balance snapshot with the given total, stamped now.
    pub async fn update_balance(&self, total: Cents) -> Result<()> {
        let balance = Balance::new(total);
        self.kv
            .set(BALANCE_KEY, &serialize_document(&balance)?)
            .await
    }

    async fn write_accounts(&self, accounts: &[Account]) -> Result<()> {
        self.kv
            .set(ACCOUNTS_KEY, &serialize_document(&accounts)?)
            .await
    }
}

fn parse_document<T: DeserializeOwned>(doc: &str, what: &str) -> Result<T> {
    serde_json::from_str(doc).with_context(|| format!("Corrupt {what} document"))
}

fn serialize_document<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize document")
}
