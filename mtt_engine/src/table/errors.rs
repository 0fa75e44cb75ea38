//! Table error types.

use thiserror::Error;

use super::{PlayerId, TableId};

/// Errors reported by a table collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Player is not at the table
    #[error("Player {player} not found at table {table}")]
    PlayerNotFound { table: TableId, player: PlayerId },

    /// Player is already at the table
    #[error("Player {player} already seated at table {table}")]
    PlayerAlreadySeated { table: TableId, player: PlayerId },

    /// No free seat left
    #[error("Table {0} is full")]
    TableFull(TableId),

    /// Chip amounts must not be negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
