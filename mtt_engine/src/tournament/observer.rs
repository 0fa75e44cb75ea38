//! Hooks through which the host follows, and may take over, what the
//! tournament does to its tables.

use super::{
    models::{TournamentId, TournamentState},
    transfer,
};
use crate::table::{PlayerId, PokerTable, TableResult};

/// Receives tournament events. Every method has a default, so
/// implementors only override what they care about.
pub trait TournamentObserver: Send {
    fn on_state_change(&mut self, _tournament: TournamentId, _state: TournamentState) {}

    /// A table was created and all its players seated.
    fn on_table_filled(&mut self, _tournament: TournamentId, _table: &dyn PokerTable) {}

    /// A table is about to be dropped.
    fn on_table_destroy(&mut self, _tournament: TournamentId, _table: &dyn PokerTable) {}

    /// Move a player between tables; defaults to [`transfer::move_player`].
    fn move_player(
        &mut self,
        _tournament: TournamentId,
        from: &mut dyn PokerTable,
        to: &mut dyn PokerTable,
        player: PlayerId,
    ) -> TableResult<()> {
        transfer::move_player(from, to, player)
    }

    /// Take an eliminated player off their table.
    fn remove_player(
        &mut self,
        _tournament: TournamentId,
        table: &mut dyn PokerTable,
        player: PlayerId,
    ) -> TableResult<()> {
        table.remove_player(player)
    }
}

/// Observer that keeps every default
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TournamentObserver for NoopObserver {}
