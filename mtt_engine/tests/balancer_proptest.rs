/// Property-based tests for table balancing and payouts using proptest
///
/// These tests check the balancing plans and the prize algorithm over a
/// wide range of generated table layouts and field sizes, then play whole
/// tournaments with random eliminations.
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use mtt_engine::{
    Chips,
    table::{MemoryTableFactory, PlayerId, TableId},
    tournament::{
        NoopObserver, TableDescriptor, Tournament, TournamentConfig, TurnOutcome, break_tables,
        equalize_tables, equalize_threshold, paid_places, prizes_algorithm,
    },
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

// Strategy to generate tables of one size with distinct players
fn tables_strategy() -> impl Strategy<Value = Vec<TableDescriptor>> {
    (2usize..=10).prop_flat_map(|max_players| {
        prop::collection::vec((0..=max_players, any::<bool>()), 1..=8).prop_map(
            move |layout| {
                layout
                    .into_iter()
                    .enumerate()
                    .map(|(index, (count, running))| {
                        let id = index as TableId + 1;
                        let players = (0..count as PlayerId).map(|seat| id * 100 + seat).collect();
                        TableDescriptor::new(id, max_players, players, running)
                    })
                    .collect()
            },
        )
    })
}

fn by_id(tables: &[TableDescriptor]) -> HashMap<TableId, &TableDescriptor> {
    tables.iter().map(|table| (table.id, table)).collect()
}

proptest! {
    #[test]
    fn test_break_moves_whole_idle_tables(tables in tables_strategy()) {
        let moves = break_tables(&tables);
        let tables_by_id = by_id(&tables);

        let sources: HashSet<TableId> = moves.iter().map(|m| m.from).collect();
        let mut received: HashMap<TableId, usize> = HashMap::new();
        let mut moved: HashMap<TableId, Vec<PlayerId>> = HashMap::new();

        for m in &moves {
            prop_assert!(m.from != m.to, "table {} moved into itself", m.from);
            prop_assert!(!tables_by_id[&m.from].running, "running table {} broken", m.from);
            prop_assert!(!sources.contains(&m.to), "broken table {} received players", m.to);
            *received.entry(m.to).or_default() += m.players.len();
            moved.entry(m.from).or_default().extend(&m.players);
        }

        for (id, count) in received {
            prop_assert!(
                count <= tables_by_id[&id].seats_left,
                "table {} received {} players with {} seats left",
                id,
                count,
                tables_by_id[&id].seats_left
            );
        }

        for id in sources {
            let mut players = moved.remove(&id).unwrap_or_default();
            players.sort_unstable();
            let mut expected = tables_by_id[&id].players.clone();
            expected.sort_unstable();
            prop_assert_eq!(players, expected, "table {} was not fully emptied", id);
        }
    }

    #[test]
    fn test_equalize_respects_thresholds(tables in tables_strategy()) {
        let moves = equalize_tables(&tables);
        let tables_by_id = by_id(&tables);

        let mut given: HashMap<TableId, usize> = HashMap::new();
        let mut received: HashMap<TableId, usize> = HashMap::new();
        let mut players = HashSet::new();

        for m in &moves {
            let from = tables_by_id[&m.from];
            let to = tables_by_id[&m.to];
            let threshold = equalize_threshold(from.max_players);

            prop_assert!(!from.running, "running table {} gave a player", m.from);
            prop_assert!(from.player_count() >= threshold);
            prop_assert!(to.player_count() < equalize_threshold(to.max_players));
            prop_assert!(from.players.contains(&m.player));
            prop_assert!(players.insert(m.player), "player {} moved twice", m.player);

            *given.entry(m.from).or_default() += 1;
            *received.entry(m.to).or_default() += 1;
        }

        for (id, count) in given {
            let table = tables_by_id[&id];
            prop_assert!(count <= table.player_count() - equalize_threshold(table.max_players));
        }
        for (id, count) in received {
            let table = tables_by_id[&id];
            prop_assert!(count <= table.max_players - table.player_count());
        }
    }

    #[test]
    fn test_prizes_sum_to_pool(entrants in 0usize..3000, buy_in in 0i64..100_000) {
        let prizes = prizes_algorithm(entrants, buy_in);

        prop_assert_eq!(prizes.len(), paid_places(entrants));
        prop_assert_eq!(prizes.iter().sum::<Chips>(), entrants as Chips * buy_in);
        prop_assert!(prizes.windows(2).all(|pair| pair[0] >= pair[1]));
        prop_assert!(prizes.iter().all(|&p| p >= 0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_tournament_conserves_players_and_chips(
        entrants in 2i64..60,
        seats in 2usize..=10,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = Tournament::new(
            TournamentConfig::sit_and_go("Random", entrants as usize, seats),
            Box::new(MemoryTableFactory::seeded(seed)),
            Box::new(NoopObserver),
            Utc::now(),
        )
        .unwrap();
        for player in 1..=entrants {
            t.register(player, Utc::now()).unwrap();
        }
        let stack = t.config().starting_stack;

        let mut outcome = TurnOutcome::Continue;
        while outcome == TurnOutcome::Continue {
            let playable: Vec<TableId> = t
                .table_ids()
                .into_iter()
                .filter(|&id| t.table(id).unwrap().player_count() >= 2)
                .collect();
            prop_assert!(!playable.is_empty(), "no table can deal a hand");

            let table_id = playable[rng.random_range(0..playable.len())];
            let table = t.table_mut(table_id).unwrap();
            let players = table.player_ids();
            let loser = rng.random_range(0..players.len());
            let winner = (loser + 1) % players.len();
            let chips = table.clear_stack(players[loser]).unwrap();
            table.pay_buy_in(players[winner], chips).unwrap();

            outcome = t.end_turn(table_id, Utc::now()).unwrap();

            let mut chips_in_play = 0;
            for id in t.table_ids() {
                let table = t.table(id).unwrap();
                prop_assert!(table.player_count() <= seats);
                for player in table.player_ids() {
                    chips_in_play += table.player(player).unwrap().stack;
                }
            }
            if outcome == TurnOutcome::Continue {
                prop_assert_eq!(t.seated_count() + t.eliminated().len(), entrants as usize);
                prop_assert_eq!(chips_in_play, entrants * stack);
            }
        }

        prop_assert_eq!(t.eliminated().len(), entrants as usize);
        prop_assert!(t.table_ids().is_empty());
        prop_assert_eq!(t.accounting_mismatch(), None);
        let mut ranks: Vec<usize> = (1..=entrants).filter_map(|p| t.rank(p)).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=entrants as usize).collect::<Vec<_>>());
    }
}
