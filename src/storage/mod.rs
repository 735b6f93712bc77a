mod kv;
mod ledger_store;

pub use kv::*;
pub use ledger_store::*;

/// Schema for the key-value table backing the ledger.
pub const MIGRATION_001_INITIAL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_records (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
