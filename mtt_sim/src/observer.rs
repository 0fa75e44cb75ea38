//! Observer that narrates the tournament through the log.

use mtt_engine::{
    table::{PlayerId, PokerTable, TableResult},
    tournament::{TournamentId, TournamentObserver, TournamentState, move_player as transfer},
};

#[derive(Debug, Default)]
pub struct LoggingObserver;

impl TournamentObserver for LoggingObserver {
    fn on_state_change(&mut self, tournament: TournamentId, state: TournamentState) {
        log::info!("[{tournament}] now {state}");
    }

    fn on_table_filled(&mut self, tournament: TournamentId, table: &dyn PokerTable) {
        log::info!(
            "[{tournament}] table {} seated {:?}",
            table.id(),
            table.player_ids()
        );
    }

    fn on_table_destroy(&mut self, tournament: TournamentId, table: &dyn PokerTable) {
        log::info!("[{tournament}] table {} closed", table.id());
    }

    fn move_player(
        &mut self,
        tournament: TournamentId,
        from: &mut dyn PokerTable,
        to: &mut dyn PokerTable,
        player: PlayerId,
    ) -> TableResult<()> {
        log::info!(
            "[{tournament}] player {player} moves from table {} to table {}",
            from.id(),
            to.id()
        );
        transfer(from, to, player)
    }

    fn remove_player(
        &mut self,
        tournament: TournamentId,
        table: &mut dyn PokerTable,
        player: PlayerId,
    ) -> TableResult<()> {
        log::info!("[{tournament}] player {player} leaves table {}", table.id());
        table.remove_player(player)
    }
}
