mod common;

use anyhow::Result;
use chrono::Utc;
use common::test_store;
use moneta::domain::{Transaction, TransactionKind};

#[tokio::test]
async fn test_uninitialized_balance_is_lazy_zero() -> Result<()> {
    let (store, kv, _temp) = test_store().await?;

    let balance = store.get_balance().await?;
    assert_eq!(balance.total, 0);

    // The zero value is returned, not seeded into the store
    assert!(kv.get("balance").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_update_balance_overwrites_snapshot() -> Result<()> {
    let (store, _kv, _temp) = test_store().await?;

    store.update_balance(4200).await?;
    assert_eq!(store.get_balance().await?.total, 4200);

    store.update_balance(-100).await?;
    let balance = store.get_balance().await?;
    assert_eq!(balance.total, -100);
    assert!(balance.last_updated <= Utc::now());

    Ok(())
}

#[tokio::test]
async fn test_balance_snapshot_tracks_transaction_writes() -> Result<()> {
    let (store, _kv, _temp) = test_store().await?;
    store.get_accounts().await?;

    store
        .save_transaction(Transaction::new(
            TransactionKind::Income,
            100,
            "in",
            Utc::now(),
            "main",
        ))
        .await?;
    assert_eq!(store.get_balance().await?.total, 100);

    store
        .save_transaction(Transaction::new(
            TransactionKind::Expense,
            40,
            "out",
            Utc::now(),
            "main",
        ))
        .await?;
    assert_eq!(store.get_balance().await?.total, 60);

    Ok(())
}

#[tokio::test]
async fn test_persisted_documents_use_wire_field_names() -> Result<()> {
    let (store, kv, _temp) = test_store().await?;
    store.get_accounts().await?;

    store
        .save_transaction(Transaction::new(
            TransactionKind::Income,
            100,
            "in",
            Utc::now(),
            "main",
        ))
        .await?;

    let accounts_doc: serde_json::Value =
        serde_json::from_str(&kv.get("accounts").await?.unwrap())?;
    assert_eq!(accounts_doc[0]["type"], "main");

    let transactions_doc: serde_json::Value =
        serde_json::from_str(&kv.get("transactions").await?.unwrap())?;
    assert_eq!(transactions_doc[0]["type"], "Income");
    assert_eq!(transactions_doc[0]["accountId"], "main");

    let balance_doc: serde_json::Value = serde_json::from_str(&kv.get("balance").await?.unwrap())?;
    assert_eq!(balance_doc["total"], 100);
    assert!(balance_doc["lastUpdated"].is_string());

    Ok(())
}
