use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a physical table in the dining room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table as listed in the inventory source.
///
/// The wire name of `id` is `table_id` to match the inventory file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "table_id")]
    pub id: TableId,
    /// Number of seats.
    pub capacity: u32,
    pub available: bool,
}

impl Table {
    pub fn new(id: u32, capacity: u32, available: bool) -> Self {
        Self {
            id: TableId(id),
            capacity,
            available,
        }
    }

    /// Whether this table is free and seats at least `party_size` people.
    pub fn fits(&self, party_size: u32) -> bool {
        self.available && self.capacity >= party_size
    }
}

/// Outcome of matching a party size against the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "table_id", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// An available table with enough seats.
    Exact(TableId),
    /// An available table offered although it may not seat the whole party.
    Alternative(TableId),
    /// Nothing is available.
    None,
}

impl MatchOutcome {
    /// The offered table, if any.
    pub fn table_id(&self) -> Option<TableId> {
        match self {
            MatchOutcome::Exact(id) | MatchOutcome::Alternative(id) => Some(*id),
            MatchOutcome::None => None,
        }
    }
}

/// Match outcome paired with a human-readable rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub rationale: String,
}
