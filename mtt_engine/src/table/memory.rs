//! In-memory table used by tests, benches and the simulator.
//!
//! `MemoryTable` keeps seats, stacks and flags but plays no cards; hosts
//! settle hands themselves through [`PokerTable::clear_stack`] and
//! [`PokerTable::pay_buy_in`].

use super::{
    PlayerId, PlayerInfo, PokerTable, SeatRandomizer, TableError, TableFactory, TableId,
    TableResult, TableSpec,
};
use crate::Chips;

#[derive(Debug, Clone)]
struct MemorySeat {
    seat: usize,
    info: PlayerInfo,
    seated: bool,
    auto_blind_ante: bool,
}

/// A table that only tracks who sits where with how many chips
#[derive(Debug, Clone)]
pub struct MemoryTable {
    id: TableId,
    spec: TableSpec,
    seats: Vec<MemorySeat>,
    running: bool,
    open: bool,
    randomizer: SeatRandomizer,
}

impl MemoryTable {
    /// Create an open table without an identifier
    pub fn new(spec: TableSpec) -> Self {
        Self::with_randomizer(spec, SeatRandomizer::new())
    }

    pub fn with_randomizer(spec: TableSpec, randomizer: SeatRandomizer) -> Self {
        Self {
            id: 0,
            spec,
            seats: Vec::new(),
            running: false,
            open: true,
            randomizer,
        }
    }

    /// Mark a hand as in progress (running tables are never broken)
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Seat index of a player
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.find(id).map(|seat| seat.seat)
    }

    /// Whether the player will post blinds and antes automatically
    pub fn is_auto_blind_ante(&self, id: PlayerId) -> bool {
        self.find(id).is_some_and(|seat| seat.auto_blind_ante)
    }

    /// Whether the player has taken a seat
    pub fn is_seated(&self, id: PlayerId) -> bool {
        self.find(id).is_some_and(|seat| seat.seated)
    }

    /// Total chips on the table
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().map(|seat| seat.info.stack).sum()
    }

    fn find(&self, id: PlayerId) -> Option<&MemorySeat> {
        self.seats.iter().find(|seat| seat.info.id == id)
    }

    fn find_mut(&mut self, id: PlayerId) -> TableResult<&mut MemorySeat> {
        let table = self.id;
        self.seats
            .iter_mut()
            .find(|seat| seat.info.id == id)
            .ok_or(TableError::PlayerNotFound { table, player: id })
    }
}

impl PokerTable for MemoryTable {
    fn id(&self) -> TableId {
        self.id
    }

    fn set_id(&mut self, id: TableId) {
        self.id = id;
    }

    fn max_players(&self) -> usize {
        self.spec.max_players
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn player_ids(&self) -> Vec<PlayerId> {
        let mut seats: Vec<&MemorySeat> = self.seats.iter().collect();
        seats.sort_by_key(|seat| seat.seat);
        seats.into_iter().map(|seat| seat.info.id).collect()
    }

    fn player_count(&self) -> usize {
        self.seats.len()
    }

    fn player(&self, id: PlayerId) -> Option<PlayerInfo> {
        self.find(id).map(|seat| seat.info.clone())
    }

    fn buy_in(&self) -> Chips {
        self.spec.buy_in
    }

    fn add_player(&mut self, id: PlayerId) -> TableResult<()> {
        if self.find(id).is_some() {
            return Err(TableError::PlayerAlreadySeated {
                table: self.id,
                player: id,
            });
        }

        let occupied: Vec<usize> = self.seats.iter().map(|seat| seat.seat).collect();
        let seat = self
            .randomizer
            .find_random_seat(&occupied, self.spec.max_players)
            .ok_or(TableError::TableFull(self.id))?;

        self.seats.push(MemorySeat {
            seat,
            info: PlayerInfo {
                id,
                name: format!("Player {id}"),
                stack: 0,
                sit_out: false,
                bot: false,
            },
            seated: false,
            auto_blind_ante: false,
        });
        Ok(())
    }

    fn remove_player(&mut self, id: PlayerId) -> TableResult<()> {
        let before = self.seats.len();
        self.seats.retain(|seat| seat.info.id != id);
        if self.seats.len() == before {
            return Err(TableError::PlayerNotFound {
                table: self.id,
                player: id,
            });
        }
        Ok(())
    }

    fn sit(&mut self, id: PlayerId) -> TableResult<()> {
        self.find_mut(id)?.seated = true;
        Ok(())
    }

    fn pay_buy_in(&mut self, id: PlayerId, amount: Chips) -> TableResult<()> {
        if amount < 0 {
            return Err(TableError::InvalidAmount(amount));
        }
        self.find_mut(id)?.info.stack += amount;
        Ok(())
    }

    fn auto_blind_ante(&mut self, id: PlayerId) -> TableResult<()> {
        self.find_mut(id)?.auto_blind_ante = true;
        Ok(())
    }

    fn sit_out(&mut self, id: PlayerId) -> TableResult<()> {
        self.find_mut(id)?.info.sit_out = true;
        Ok(())
    }

    fn set_bot(&mut self, id: PlayerId) -> TableResult<()> {
        self.find_mut(id)?.info.bot = true;
        Ok(())
    }

    fn set_player_name(&mut self, id: PlayerId, name: &str) -> TableResult<()> {
        self.find_mut(id)?.info.name = name.to_string();
        Ok(())
    }

    fn clear_stack(&mut self, id: PlayerId) -> TableResult<Chips> {
        let seat = self.find_mut(id)?;
        Ok(std::mem::take(&mut seat.info.stack))
    }

    fn broke_player_ids(&self) -> Vec<PlayerId> {
        let mut broke: Vec<&MemorySeat> = self
            .seats
            .iter()
            .filter(|seat| seat.info.stack == 0)
            .collect();
        broke.sort_by_key(|seat| seat.seat);
        broke.into_iter().map(|seat| seat.info.id).collect()
    }

    fn open(&mut self) {
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// Factory handing out [`MemoryTable`]s without identifiers
#[derive(Debug, Default)]
pub struct MemoryTableFactory {
    seed: Option<u64>,
    created: u64,
}

impl MemoryTableFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat players reproducibly; each table derives its own seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            created: 0,
        }
    }

    pub fn created(&self) -> u64 {
        self.created
    }
}

impl TableFactory for MemoryTableFactory {
    fn create_table(&mut self, spec: &TableSpec) -> Box<dyn PokerTable> {
        self.created += 1;
        let randomizer = match self.seed {
            Some(seed) => SeatRandomizer::seeded(seed.wrapping_add(self.created)),
            None => SeatRandomizer::new(),
        };
        Box::new(MemoryTable::with_randomizer(spec.clone(), randomizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(max_players: usize) -> MemoryTable {
        MemoryTable::with_randomizer(
            TableSpec {
                max_players,
                ..TableSpec::default()
            },
            SeatRandomizer::seeded(1),
        )
    }

    #[test]
    fn test_add_player_takes_a_free_seat() {
        let mut table = table(3);
        for id in 1..=3 {
            table.add_player(id).unwrap();
        }

        let mut seats: Vec<usize> = (1..=3).map(|id| table.seat_of(id).unwrap()).collect();
        seats.sort_unstable();
        assert_eq!(seats, vec![0, 1, 2]);
        assert_eq!(table.add_player(4), Err(TableError::TableFull(0)));
    }

    #[test]
    fn test_add_player_twice_fails() {
        let mut table = table(3);
        table.add_player(1).unwrap();
        assert!(matches!(
            table.add_player(1),
            Err(TableError::PlayerAlreadySeated { player: 1, .. })
        ));
    }

    #[test]
    fn test_broke_players_have_no_chips() {
        let mut table = table(4);
        for id in 1..=3 {
            table.add_player(id).unwrap();
        }
        table.pay_buy_in(2, 100).unwrap();

        let mut broke = table.broke_player_ids();
        broke.sort_unstable();
        assert_eq!(broke, vec![1, 3]);
    }

    #[test]
    fn test_clear_stack_returns_chips() {
        let mut table = table(4);
        table.add_player(5).unwrap();
        table.pay_buy_in(5, 300).unwrap();
        table.pay_buy_in(5, 200).unwrap();

        assert_eq!(table.clear_stack(5), Ok(500));
        assert_eq!(table.player(5).unwrap().stack, 0);
    }

    #[test]
    fn test_negative_buy_in_rejected() {
        let mut table = table(4);
        table.add_player(5).unwrap();
        assert_eq!(table.pay_buy_in(5, -1), Err(TableError::InvalidAmount(-1)));
    }

    #[test]
    fn test_remove_unknown_player() {
        let mut table = table(4);
        assert!(matches!(
            table.remove_player(9),
            Err(TableError::PlayerNotFound { player: 9, .. })
        ));
    }

    #[test]
    fn test_factory_creates_unnumbered_open_tables() {
        let mut factory = MemoryTableFactory::seeded(3);
        let table = factory.create_table(&TableSpec::default());
        assert_eq!(table.id(), 0);
        assert_eq!(table.max_players(), 10);
        assert_eq!(factory.created(), 1);
    }
}
