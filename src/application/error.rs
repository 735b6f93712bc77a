use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("The main account cannot be deleted")]
    MainAccountProtected,

    #[error("Only one main account may exist; it is created automatically")]
    MainAccountReserved,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
