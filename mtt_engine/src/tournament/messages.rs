//! Tournament actor message types.

use std::fmt;

use tokio::sync::oneshot;

use super::{
    errors::TournamentResult,
    models::{TournamentInfo, TurnOutcome},
};
use crate::{
    Chips,
    table::{PlayerId, PokerTable, TableId, TableResult},
};

/// Work run against one table inside the actor
pub type TableOperation = Box<dyn FnOnce(&mut dyn PokerTable) -> TableResult<()> + Send>;

/// Messages that can be sent to a TournamentActor
pub enum TournamentMessage {
    /// Register a player
    Register {
        player: PlayerId,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Withdraw a registration
    Unregister {
        player: PlayerId,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// A hand ended at a table
    EndTurn {
        table_id: TableId,
        response: oneshot::Sender<TournamentResult<TurnOutcome>>,
    },

    /// Run an operation against one table, e.g. to play a hand
    WithTable {
        table_id: TableId,
        operation: TableOperation,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Get tournament information
    GetInfo {
        response: oneshot::Sender<TournamentInfo>,
    },

    /// Get payouts
    GetPrizes {
        response: oneshot::Sender<Option<Vec<Chips>>>,
    },

    /// Get the finishing place of a player
    GetRank {
        player: PlayerId,
        response: oneshot::Sender<Option<usize>>,
    },

    /// Internal: check registration and start timers
    Tick,

    /// Stop the actor
    Close {
        response: oneshot::Sender<TournamentInfo>,
    },
}

impl fmt::Debug for TournamentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentMessage::Register { player, .. } => {
                f.debug_struct("Register").field("player", player).finish()
            }
            TournamentMessage::Unregister { player, .. } => {
                f.debug_struct("Unregister").field("player", player).finish()
            }
            TournamentMessage::EndTurn { table_id, .. } => {
                f.debug_struct("EndTurn").field("table_id", table_id).finish()
            }
            TournamentMessage::WithTable { table_id, .. } => f
                .debug_struct("WithTable")
                .field("table_id", table_id)
                .finish(),
            TournamentMessage::GetInfo { .. } => f.write_str("GetInfo"),
            TournamentMessage::GetPrizes { .. } => f.write_str("GetPrizes"),
            TournamentMessage::GetRank { player, .. } => {
                f.debug_struct("GetRank").field("player", player).finish()
            }
            TournamentMessage::Tick => f.write_str("Tick"),
            TournamentMessage::Close { .. } => f.write_str("Close"),
        }
    }
}
