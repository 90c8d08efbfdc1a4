use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse category of a user request. Exactly one per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Reservation,
    Menu,
    Order,
    Info,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::Reservation,
        Intent::Menu,
        Intent::Order,
        Intent::Info,
        Intent::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Reservation => "reservation",
            Intent::Menu => "menu",
            Intent::Order => "order",
            Intent::Info => "info",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
