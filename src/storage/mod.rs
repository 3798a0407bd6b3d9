pub mod json_backend;

use crate::{errors::CoreError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Abstraction over persistence backends capable of storing ledgers and
/// snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Ledger>;
}

pub use json_backend::JsonStorage;
