//! The tournament controller: registrations, tables, eliminations.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::{
    balancer::{TableDescriptor, break_tables, equalize_tables},
    errors::{TournamentError, TournamentResult},
    models::{
        AccountingMismatch, PrizeSpecs, TournamentConfig, TournamentId, TournamentInfo,
        TournamentState, TurnOutcome,
    },
    observer::TournamentObserver,
    prizes::prizes_algorithm,
    transfer::MutationGuard,
};
use crate::{
    Chips,
    table::{PlayerId, PokerTable, TableFactory, TableId, TableResult},
};

/// A multi-table tournament.
///
/// All mutating calls take `&mut self`; hosts that share a tournament
/// between tasks wrap it in a [`TournamentActor`](super::TournamentActor).
/// Operations that depend on the clock take `now` so the host decides
/// when timers fire.
pub struct Tournament {
    config: TournamentConfig,
    state: TournamentState,
    can_register: bool,
    /// Registration order
    players: Vec<PlayerId>,
    /// Most recently eliminated first
    eliminated: Vec<PlayerId>,
    /// Open tables, in creation order
    tables: Vec<Box<dyn PokerTable>>,
    id_to_index: HashMap<TableId, usize>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    accounting_mismatch: Option<AccountingMismatch>,
    factory: Box<dyn TableFactory>,
    observer: Box<dyn TournamentObserver>,
}

impl Tournament {
    /// Create a tournament, opening registration right away if its
    /// register time has passed
    pub fn new(
        config: TournamentConfig,
        factory: Box<dyn TableFactory>,
        observer: Box<dyn TournamentObserver>,
        now: DateTime<Utc>,
    ) -> TournamentResult<Self> {
        config.validate()?;

        let mut tournament = Self {
            config,
            state: TournamentState::Announced,
            can_register: false,
            players: Vec::new(),
            eliminated: Vec::new(),
            tables: Vec::new(),
            id_to_index: HashMap::new(),
            started_at: None,
            finished_at: None,
            accounting_mismatch: None,
            factory,
            observer,
        };
        tournament.update_registering(now);
        Ok(tournament)
    }

    pub fn id(&self) -> TournamentId {
        self.config.serial
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    /// Whether registration is currently open
    pub fn registration_open(&self) -> bool {
        self.can_register
    }

    /// Registered players, in registration order
    pub fn registered(&self) -> &[PlayerId] {
        &self.players
    }

    /// Eliminated players, most recent first; the winner is first once complete
    pub fn eliminated(&self) -> &[PlayerId] {
        &self.eliminated
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// The last discrepancy between the winner's chips and the chips in play
    pub fn accounting_mismatch(&self) -> Option<AccountingMismatch> {
        self.accounting_mismatch
    }

    /// Open tables, in creation order
    pub fn table_ids(&self) -> Vec<TableId> {
        self.tables.iter().map(|table| table.id()).collect()
    }

    pub fn table(&self, id: TableId) -> Option<&dyn PokerTable> {
        let index = *self.id_to_index.get(&id)?;
        let table: &dyn PokerTable = self.tables[index].as_ref();
        Some(table)
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut dyn PokerTable> {
        let index = *self.id_to_index.get(&id)?;
        let table: &mut dyn PokerTable = self.tables[index].as_mut();
        Some(table)
    }

    /// Players seated across all open tables
    pub fn seated_count(&self) -> usize {
        self.tables.iter().map(|table| table.player_count()).sum()
    }

    pub fn info(&self) -> TournamentInfo {
        TournamentInfo {
            id: self.config.serial,
            name: self.config.name.clone(),
            state: self.state,
            can_register: self.can_register,
            players_quota: self.config.players_quota,
            registered: self.players.clone(),
            eliminated: self.eliminated.clone(),
            table_ids: self.table_ids(),
            seated_count: self.seated_count(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    /// Open registration once its time has come.
    ///
    /// Returns how long until registration opens while the tournament is
    /// announced, `None` once it has opened or in any other state.
    pub fn update_registering(&mut self, now: DateTime<Utc>) -> Option<Duration> {
        if self.state != TournamentState::Announced {
            log::debug!(
                "Tournament {}: update_registering called while {}",
                self.config.serial,
                self.state
            );
            return None;
        }

        if now > self.config.register_time {
            // Announced -> Registering is always a valid edge.
            let _ = self.change_state(TournamentState::Registering, now);
            None
        } else {
            Some(self.config.register_time - now)
        }
    }

    /// Time left until the next clock-driven transition, if any
    pub fn time_until_next_transition(&self, now: DateTime<Utc>) -> Option<Duration> {
        let deadline = match self.state {
            TournamentState::Announced => self.config.register_time,
            TournamentState::Registering if !self.config.sit_and_go => self.config.start_time,
            TournamentState::Registering => return None,
            TournamentState::Running | TournamentState::Complete => return None,
        };
        Some((deadline - now).max(Duration::zero()))
    }

    /// Start a scheduled tournament once its start time has passed.
    ///
    /// Sit-and-go tournaments start from [`register`](Self::register) when
    /// the quota is reached, and nothing starts without a single entrant.
    pub fn start_if_due(&mut self, now: DateTime<Utc>) -> TournamentResult<bool> {
        if self.state != TournamentState::Registering
            || self.config.sit_and_go
            || now < self.config.start_time
        {
            return Ok(false);
        }

        if self.players.is_empty() {
            log::warn!(
                "Tournament {}: start time reached without entrants",
                self.config.serial
            );
            return Ok(false);
        }

        self.change_state(TournamentState::Running, now)?;
        Ok(true)
    }

    /// Move along the lifecycle, firing the side effect of the edge taken.
    pub fn change_state(
        &mut self,
        state: TournamentState,
        now: DateTime<Utc>,
    ) -> TournamentResult<()> {
        match (self.state, state) {
            (TournamentState::Announced, TournamentState::Registering) => {
                self.can_register = true;
            }
            (TournamentState::Registering, TournamentState::Running) => {
                if self.players.is_empty() {
                    log::error!(
                        "Tournament {}: cannot start without entrants",
                        self.config.serial
                    );
                    return Err(TournamentError::NoEntrants);
                }
                self.create_tables()?;
                self.started_at = Some(now);
                if self.config.sit_and_go || self.players.len() >= self.config.players_quota {
                    self.can_register = false;
                }
            }
            (TournamentState::Running, TournamentState::Complete) => {
                self.finished_at = Some(now);
                self.can_register = false;
            }
            (from, to) => {
                log::error!(
                    "Tournament {}: cannot change from state {} to state {}",
                    self.config.serial,
                    from,
                    to
                );
                return Err(TournamentError::InvalidTransition { from, to });
            }
        }

        log::info!(
            "Tournament {}: state change {} => {}",
            self.config.serial,
            self.state,
            state
        );
        self.state = state;
        self.observer.on_state_change(self.config.serial, state);
        Ok(())
    }

    pub fn is_registered(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub fn can_register(&self, player: PlayerId) -> bool {
        self.can_register && !self.is_registered(player)
    }

    pub fn can_unregister(&self, player: PlayerId) -> bool {
        self.is_registered(player) && self.state == TournamentState::Registering
    }

    /// Register a player.
    ///
    /// While registering this may start a sit-and-go. While running the
    /// player is seated at once, and refused if no table has a free seat.
    pub fn register(&mut self, player: PlayerId, now: DateTime<Utc>) -> TournamentResult<()> {
        if !self.can_register {
            return Err(TournamentError::RegistrationClosed);
        }
        if self.is_registered(player) {
            return Err(TournamentError::AlreadyRegistered(player));
        }

        match self.state {
            TournamentState::Running => {
                self.sit_player(player)?;
                self.players.push(player);
            }
            _ => {
                self.players.push(player);
                if self.state == TournamentState::Registering && self.can_run(now) {
                    if let Err(err) = self.change_state(TournamentState::Running, now) {
                        self.players.pop();
                        return Err(err);
                    }
                }
            }
        }

        log::debug!(
            "Tournament {}: player {} registered ({} total)",
            self.config.serial,
            player,
            self.players.len()
        );
        Ok(())
    }

    pub fn unregister(&mut self, player: PlayerId) -> TournamentResult<()> {
        if self.state != TournamentState::Registering {
            return Err(TournamentError::InvalidState {
                expected: TournamentState::Registering,
                actual: self.state,
            });
        }

        let position = self
            .players
            .iter()
            .position(|&registered| registered == player)
            .ok_or(TournamentError::NotRegistered(player))?;
        self.players.remove(position);
        Ok(())
    }

    /// 1-based finishing place of an eliminated player
    pub fn rank(&self, player: PlayerId) -> Option<usize> {
        let index = self.eliminated.iter().position(|&p| p == player)?;
        let rank_first = self.players.len() - self.eliminated.len();
        Some(index + rank_first + 1)
    }

    /// Payouts, best place first; `None` while registration is open or
    /// when the host settles prizes
    pub fn prizes(&self) -> Option<Vec<Chips>> {
        if self.can_register {
            return None;
        }

        match self.config.prize_specs {
            PrizeSpecs::Algorithm => Some(prizes_algorithm(self.players.len(), self.config.buy_in)),
            PrizeSpecs::External => None,
        }
    }

    fn can_run(&self, now: DateTime<Utc>) -> bool {
        self.config.start_time < now
            && self.config.sit_and_go
            && self.config.players_quota <= self.players.len()
    }

    /// Seat a late entrant at the emptiest table with a free seat
    fn sit_player(&mut self, player: PlayerId) -> TournamentResult<()> {
        let index = self
            .tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.seats_left() > 0)
            .min_by_key(|(index, table)| (table.player_count(), *index))
            .map(|(index, _)| index)
            .ok_or_else(|| {
                log::warn!(
                    "Tournament {}: no free seat for late entrant {}",
                    self.config.serial,
                    player
                );
                TournamentError::NoSeatAvailable(player)
            })?;

        let mut table = MutationGuard::open(self.tables[index].as_mut());
        table.add_player(player)?;
        if let Err(err) = seat_with_buy_in(&mut *table, player) {
            // Undo the seat; the entrant is not registered.
            if let Err(undo) = table.remove_player(player) {
                log::error!(
                    "Tournament {}: could not unseat failed entrant {}: {}",
                    self.config.serial,
                    player,
                    undo
                );
            }
            return Err(err.into());
        }
        log::info!(
            "Tournament {}: late entrant {} seated at table {}",
            self.config.serial,
            player,
            table.id()
        );
        Ok(())
    }

    /// Open `ceil(registered / seats)` tables and seat everyone, last
    /// registered first.
    ///
    /// Nothing is committed unless every table was created and filled.
    fn create_tables(&mut self) -> TournamentResult<()> {
        let seats = self.config.seats_per_table;
        let table_count = self.players.len().div_ceil(seats);

        let spec = self.config.table_spec();
        let mut pending = self.players.clone();
        let mut tables = Vec::with_capacity(table_count);
        for number in 1..=table_count {
            let mut table = self.factory.create_table(&spec);
            if table.id() == 0 {
                table.set_id(number as TableId);
            }

            for _ in 0..seats {
                let Some(player) = pending.pop() else {
                    break;
                };
                table.add_player(player)?;
                seat_with_buy_in(table.as_mut(), player)?;
            }
            table.close();
            tables.push(table);
        }
        let id_to_index = lookup(&tables)?;

        self.config.players_quota = table_count * seats;
        self.tables = tables;
        self.id_to_index = id_to_index;
        for table in &self.tables {
            log::info!(
                "Tournament {}: table {} filled with {} players",
                self.config.serial,
                table.id(),
                table.player_count()
            );
            self.observer
                .on_table_filled(self.config.serial, table.as_ref());
        }
        Ok(())
    }

    fn rebuild_lookup(&mut self) -> TournamentResult<()> {
        self.id_to_index = lookup(&self.tables)?;
        Ok(())
    }

    fn table_index(&self, id: TableId) -> TournamentResult<usize> {
        self.id_to_index
            .get(&id)
            .copied()
            .ok_or(TournamentError::TableNotFound(id))
    }

    /// Report that a hand ended at `table_id`.
    ///
    /// Broke players are eliminated (each exactly once) and the tables are
    /// rebalanced. When a single player is left they are declared the
    /// winner, every table is released and the tournament completes.
    pub fn end_turn(
        &mut self,
        table_id: TableId,
        now: DateTime<Utc>,
    ) -> TournamentResult<TurnOutcome> {
        if self.state != TournamentState::Running {
            return Err(TournamentError::InvalidState {
                expected: TournamentState::Running,
                actual: self.state,
            });
        }

        let serial = self.config.serial;
        let index = self.table_index(table_id)?;
        let broke = self.tables[index].broke_player_ids();

        let mut eliminated = 0;
        for player in broke {
            if self.eliminated.contains(&player) {
                log::warn!(
                    "Tournament {}: player {} reported broke again at table {}",
                    serial,
                    player,
                    table_id
                );
                continue;
            }
            self.observer
                .remove_player(serial, self.tables[index].as_mut(), player)?;
            self.eliminated.insert(0, player);
            eliminated += 1;
            log::debug!(
                "Tournament {}: player {} eliminated at table {}",
                serial,
                player,
                table_id
            );
        }

        if self.eliminated.len() + 1 >= self.players.len() {
            self.finish(now)?;
            return Ok(TurnOutcome::Finished);
        }

        if eliminated > 0 {
            self.balance_tables()?;
        }
        Ok(TurnOutcome::Continue)
    }

    fn finish(&mut self, now: DateTime<Utc>) -> TournamentResult<()> {
        let serial = self.config.serial;

        let last_table = self.tables.iter().position(|table| table.player_count() > 0);
        match last_table {
            Some(index) => {
                let table = &mut self.tables[index];
                let winner = table.player_ids()[0];
                let expected = table.buy_in() * self.players.len() as Chips;

                let chips = table.clear_stack(winner)?;
                if let Err(err) = self.observer.remove_player(serial, table.as_mut(), winner) {
                    // Still seated, so give the stack back before bailing out.
                    if let Err(undo) = table.pay_buy_in(winner, chips) {
                        log::error!(
                            "Tournament {}: could not restore {} chips to winner {}: {}",
                            serial,
                            chips,
                            winner,
                            undo
                        );
                    }
                    return Err(err.into());
                }

                self.eliminated.insert(0, winner);
                if chips != expected {
                    log::error!(
                        "Tournament {}: winner {} has {} chips and should have {} chips",
                        serial,
                        winner,
                        chips,
                        expected
                    );
                    self.accounting_mismatch = Some(AccountingMismatch {
                        player: winner,
                        actual: chips,
                        expected,
                    });
                }
                log::info!("Tournament {}: winners {:?}", serial, self.eliminated);
            }
            None => {
                log::error!("Tournament {}: no player left to declare winner", serial);
            }
        }

        for table in &self.tables {
            self.observer.on_table_destroy(serial, table.as_ref());
        }
        self.tables.clear();
        self.id_to_index.clear();

        self.change_state(TournamentState::Complete, now)
    }

    /// Break what can be broken, otherwise even out the tables.
    ///
    /// Returns whether any player moved.
    pub fn balance_tables(&mut self) -> TournamentResult<bool> {
        let descriptors: Vec<TableDescriptor> = self
            .tables
            .iter()
            .map(|table| TableDescriptor::from_table(table.as_ref()))
            .collect();

        let to_break = break_tables(&descriptors);
        if !to_break.is_empty() {
            let mut broken: Vec<TableId> = Vec::new();
            for step in &to_break {
                for &player in &step.players {
                    log::debug!(
                        "Tournament {}: player {} moved from {} to {}",
                        self.config.serial,
                        player,
                        step.from,
                        step.to
                    );
                    self.move_player(step.from, step.to, player)?;
                }
                if !broken.contains(&step.from) {
                    broken.push(step.from);
                }
            }

            for table_id in &broken {
                self.destroy_table(*table_id)?;
            }
            log::info!(
                "Tournament {}: broke tables {:?}",
                self.config.serial,
                broken
            );
            return Ok(true);
        }

        let to_equalize = equalize_tables(&descriptors);
        for step in &to_equalize {
            log::debug!(
                "Tournament {}: player {} moved from {} to {}",
                self.config.serial,
                step.player,
                step.from,
                step.to
            );
            self.move_player(step.from, step.to, step.player)?;
        }

        Ok(!to_equalize.is_empty())
    }

    fn move_player(
        &mut self,
        from_id: TableId,
        to_id: TableId,
        player: PlayerId,
    ) -> TournamentResult<()> {
        let from = self.table_index(from_id)?;
        let to = self.table_index(to_id)?;
        if from == to {
            return Err(TournamentError::SameTable(from_id));
        }

        let (source, destination) = if from < to {
            let (left, right) = self.tables.split_at_mut(to);
            (&mut left[from], &mut right[0])
        } else {
            let (left, right) = self.tables.split_at_mut(from);
            (&mut right[0], &mut left[to])
        };

        self.observer.move_player(
            self.config.serial,
            source.as_mut(),
            destination.as_mut(),
            player,
        )?;
        Ok(())
    }

    fn destroy_table(&mut self, id: TableId) -> TournamentResult<()> {
        let index = self.table_index(id)?;
        let table = self.tables.remove(index);
        if table.player_count() > 0 {
            log::warn!(
                "Tournament {}: destroying table {} with {} players still seated",
                self.config.serial,
                id,
                table.player_count()
            );
        }
        self.observer
            .on_table_destroy(self.config.serial, table.as_ref());
        self.rebuild_lookup()
    }
}

/// Pay the table buy-in to a freshly added player, seat them and have
/// them post blinds automatically
fn seat_with_buy_in(table: &mut dyn PokerTable, player: PlayerId) -> TableResult<()> {
    let buy_in = table.buy_in();
    table.pay_buy_in(player, buy_in)?;
    table.sit(player)?;
    table.auto_blind_ante(player)
}

fn lookup(tables: &[Box<dyn PokerTable>]) -> TournamentResult<HashMap<TableId, usize>> {
    let mut id_to_index = HashMap::with_capacity(tables.len());
    for (index, table) in tables.iter().enumerate() {
        if id_to_index.insert(table.id(), index).is_some() {
            return Err(TournamentError::DuplicateTable(table.id()));
        }
    }
    Ok(id_to_index)
}
