// ABOUTME: Persistence layer for named option objects
// ABOUTME: Option store trait with SQLite and in-memory backends

pub mod memory;
pub mod options;
pub mod sqlite;

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Revision conflict on option {name}: expected {expected}, found {actual}")]
    Conflict {
        name: String,
        expected: i64,
        actual: i64,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// Re-export main types
pub use memory::MemoryOptionStore;
pub use options::{OptionStore, StoredOption};
pub use sqlite::SqliteOptionStore;
