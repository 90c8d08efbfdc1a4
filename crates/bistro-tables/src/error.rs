//! Inventory loading errors. All of them are fatal at startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid inventory format: {0}")]
    Parse(String),

    #[error("duplicate table_id {0}")]
    DuplicateId(u32),

    #[error("table {table_id} has invalid capacity {capacity}")]
    InvalidCapacity { table_id: u32, capacity: u32 },

    #[error("table_id must be positive")]
    InvalidId,
}

/// Convenience alias for inventory results.
pub type InventoryResult<T> = Result<T, InventoryError>;
