//! Table configuration models.

use serde::{Deserialize, Serialize};

use crate::Chips;

/// Default number of chips a player sits down with.
pub const DEFAULT_TABLE_BUY_IN: Chips = 1_500;

/// Parameters handed to a [`TableFactory`](super::TableFactory) when the
/// tournament opens a new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Game variant (e.g. "holdem")
    pub variant: String,

    /// Betting structure name (e.g. "level-15-30-no-limit")
    pub betting_structure: String,

    /// Number of seats at the table
    pub max_players: usize,

    /// Starting stack paid to each player seated at creation
    pub buy_in: Chips,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            variant: "holdem".to_string(),
            betting_structure: "level-15-30-no-limit".to_string(),
            max_players: 10,
            buy_in: DEFAULT_TABLE_BUY_IN,
        }
    }
}

impl TableSpec {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_players < 2 || self.max_players > 23 {
            return Err("Max players must be between 2 and 23".to_string());
        }

        if self.buy_in <= 0 {
            return Err("Buy-in must be greater than 0".to_string());
        }

        if self.variant.is_empty() {
            return Err("Variant must not be empty".to_string());
        }

        Ok(())
    }
}
