use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account already exists with last name: {0}")]
    DuplicateAccount(String),

    #[error(
        "Deposit of {requested} would exceed the daily limit of {limit} (already deposited today: {daily_total})"
    )]
    DepositLimitExceeded {
        requested: Cents,
        daily_total: Cents,
        limit: Cents,
    },

    #[error("Insufficient funds in account {last_name}: balance {balance}, required {requested}")]
    InsufficientFunds {
        last_name: String,
        balance: Cents,
        requested: Cents,
    },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
