//! The narrow interface the tournament engine needs from a single-table
//! game engine.

use serde::{Deserialize, Serialize};

use super::{PlayerId, TableId, TableResult, TableSpec};
use crate::Chips;

/// Snapshot of one seated player, read before a player changes tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub stack: Chips,
    pub sit_out: bool,
    pub bot: bool,
}

/// A single poker table as seen by the tournament.
///
/// Implementations deal the cards, move the button and collect blinds; the
/// tournament only seats, pays, moves and removes players. Mutations are
/// bracketed by [`open`](PokerTable::open) and [`close`](PokerTable::close)
/// so observers polling the table never see a half-applied transfer.
pub trait PokerTable: Send {
    /// Table identifier, `0` when the engine has not assigned one.
    fn id(&self) -> TableId;

    fn set_id(&mut self, id: TableId);

    fn max_players(&self) -> usize;

    /// Whether a hand is currently in progress.
    fn is_running(&self) -> bool;

    /// All players at the table, in seat order.
    fn player_ids(&self) -> Vec<PlayerId>;

    /// All players at the table, sorted by identifier.
    fn player_ids_sorted(&self) -> Vec<PlayerId> {
        let mut ids = self.player_ids();
        ids.sort_unstable();
        ids
    }

    fn player_count(&self) -> usize {
        self.player_ids().len()
    }

    fn seats_left(&self) -> usize {
        self.max_players().saturating_sub(self.player_count())
    }

    fn player(&self, id: PlayerId) -> Option<PlayerInfo>;

    /// Stack each player receives when seated at creation.
    fn buy_in(&self) -> Chips;

    fn add_player(&mut self, id: PlayerId) -> TableResult<()>;

    fn remove_player(&mut self, id: PlayerId) -> TableResult<()>;

    fn sit(&mut self, id: PlayerId) -> TableResult<()>;

    /// Add `amount` chips to the player's stack.
    fn pay_buy_in(&mut self, id: PlayerId, amount: Chips) -> TableResult<()>;

    fn auto_blind_ante(&mut self, id: PlayerId) -> TableResult<()>;

    fn sit_out(&mut self, id: PlayerId) -> TableResult<()>;

    fn set_bot(&mut self, id: PlayerId) -> TableResult<()>;

    fn set_player_name(&mut self, id: PlayerId, name: &str) -> TableResult<()>;

    /// Zero the player's stack and return what it held.
    fn clear_stack(&mut self, id: PlayerId) -> TableResult<Chips>;

    /// Players left with no chips after the last hand, in seat order.
    fn broke_player_ids(&self) -> Vec<PlayerId>;

    fn open(&mut self);

    fn close(&mut self);
}

/// Creates the tables a tournament plays on.
pub trait TableFactory: Send {
    fn create_table(&mut self, spec: &TableSpec) -> Box<dyn PokerTable>;
}

impl<F> TableFactory for F
where
    F: FnMut(&TableSpec) -> Box<dyn PokerTable> + Send,
{
    fn create_table(&mut self, spec: &TableSpec) -> Box<dyn PokerTable> {
        self(spec)
    }
}
