use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger and service failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Rule not found: {0}")]
    RuleNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
