//! Read-only table inventory, loaded once from a flat JSON list.

use std::collections::HashSet;
use std::path::Path;

use bistro_protocol::{MatchResult, Table, TableId};

use crate::error::{InventoryError, InventoryResult};
use crate::matcher;

/// Validated list of tables in their stored order.
///
/// Stored order is significant: `find_table` offers the first eligible
/// table it meets.
#[derive(Debug, Clone)]
pub struct TableInventory {
    tables: Vec<Table>,
}

impl TableInventory {
    /// Build an inventory, rejecting non-positive ids or capacities and
    /// duplicate ids.
    pub fn new(tables: Vec<Table>) -> InventoryResult<Self> {
        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            if table.id.0 == 0 {
                return Err(InventoryError::InvalidId);
            }
            if table.capacity == 0 {
                return Err(InventoryError::InvalidCapacity {
                    table_id: table.id.0,
                    capacity: table.capacity,
                });
            }
            if !seen.insert(table.id) {
                return Err(InventoryError::DuplicateId(table.id.0));
            }
        }
        Ok(Self { tables })
    }

    /// Parse a JSON array of `{"table_id", "capacity", "available"}` records.
    pub fn from_json(json: &str) -> InventoryResult<Self> {
        let tables: Vec<Table> =
            serde_json::from_str(json).map_err(|e| InventoryError::Parse(e.to_string()))?;
        Self::new(tables)
    }

    /// Load the inventory file at startup.
    pub fn from_file(path: impl AsRef<Path>) -> InventoryResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| InventoryError::Io(format!("{}: {e}", path.display())))?;
        let inventory = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            tables = inventory.len(),
            available = inventory.available().count(),
            "table inventory loaded"
        );
        Ok(inventory)
    }

    /// Small dining room for development and tests.
    pub fn sample() -> Self {
        Self {
            tables: vec![
                Table::new(1, 2, true),
                Table::new(2, 4, true),
                Table::new(3, 4, false),
                Table::new(4, 6, true),
                Table::new(5, 8, false),
            ],
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Available tables in stored order.
    pub fn available(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.available)
    }

    pub fn find_table(&self, party_size: u32) -> MatchResult {
        matcher::find_table(&self.tables, party_size)
    }
}
