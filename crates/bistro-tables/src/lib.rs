//! Table inventory and matching for Bistro.
//!
//! The inventory is loaded once at startup from a flat JSON list and is
//! read-only afterwards. `find_table` decides which table, if any, to offer
//! for a party size.

pub mod error;
pub mod inventory;
pub mod matcher;

pub use error::{InventoryError, InventoryResult};
pub use inventory::TableInventory;
pub use matcher::find_table;
