//! Table rebalancing plans.
//!
//! Both passes work on [`TableDescriptor`] snapshots and only describe
//! moves; the tournament applies them. Breaking is always attempted first
//! because closing a whole table is worth more than evening out seats.

use serde::{Deserialize, Serialize};

use crate::table::{PlayerId, PokerTable, TableId};

/// Snapshot of one table for a single balancing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub id: TableId,
    pub max_players: usize,
    pub seats_left: usize,
    /// Players in seat order
    pub players: Vec<PlayerId>,
    /// Players this pass already plans to seat here
    pub to_add: Vec<PlayerId>,
    pub running: bool,
}

impl TableDescriptor {
    pub fn new(id: TableId, max_players: usize, players: Vec<PlayerId>, running: bool) -> Self {
        Self {
            id,
            max_players,
            seats_left: max_players.saturating_sub(players.len()),
            players,
            to_add: Vec::new(),
            running,
        }
    }

    pub fn from_table(table: &dyn PokerTable) -> Self {
        Self::new(
            table.id(),
            table.max_players(),
            table.player_ids(),
            table.is_running(),
        )
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

/// Players leaving a broken table for one fill target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakMove {
    pub from: TableId,
    pub to: TableId,
    pub players: Vec<PlayerId>,
}

/// One player moving to a short-handed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualizeMove {
    pub from: TableId,
    pub to: TableId,
    pub player: PlayerId,
}

/// Plan which tables can be closed and where their players go.
///
/// Idle tables come before running ones, each group smallest first. The
/// smallest table is broken into the others, largest first, and the pass
/// repeats with what is left. The first table that cannot be broken ends
/// the pass, even if a larger one could have been.
pub fn break_tables(tables: &[TableDescriptor]) -> Vec<BreakMove> {
    if tables.len() < 2 {
        return Vec::new();
    }

    let mut to_break = tables.to_vec();
    to_break.sort_by_key(|table| (table.running, table.player_count()));

    let mut moves = Vec::new();
    loop {
        let Some((candidate, to_fill)) = to_break.split_first_mut() else {
            break;
        };
        let result = break_table(candidate, to_fill);

        to_break = to_break
            .into_iter()
            .skip(1)
            .filter(|table| table.seats_left > 0)
            .collect();

        match result {
            Some(result) => moves.extend(result),
            None => break,
        }

        if to_break.len() < 2 {
            break;
        }
    }

    moves
}

/// Spread `candidate`'s players over `to_fill`, or `None` if it may not
/// or cannot be broken.
fn break_table(
    candidate: &TableDescriptor,
    to_fill: &mut [TableDescriptor],
) -> Option<Vec<BreakMove>> {
    // Tables that already receive players or are mid-hand stay.
    if !candidate.to_add.is_empty() || candidate.running {
        return None;
    }

    let seats_left: usize = to_fill.iter().map(|table| table.seats_left).sum();
    if seats_left < candidate.player_count() {
        return None;
    }

    let mut remaining = candidate.players.as_slice();
    let mut moves = Vec::new();
    for target in to_fill.iter_mut().rev() {
        if target.seats_left == 0 {
            continue;
        }

        let count = target.seats_left.min(remaining.len());
        let (moved, rest) = remaining.split_at(count);
        target.to_add.extend_from_slice(moved);
        target.seats_left -= count;
        moves.push(BreakMove {
            from: candidate.id,
            to: target.id,
            players: moved.to_vec(),
        });
        remaining = rest;

        if remaining.is_empty() {
            break;
        }
    }

    Some(moves)
}

/// Occupancy below which a table asks for players: 70% of its seats, rounded down.
pub fn equalize_threshold(max_players: usize) -> usize {
    max_players * 7 / 10
}

struct Want {
    id: TableId,
    remaining: usize,
}

/// Plan single-player moves from well-filled idle tables to short-handed ones.
///
/// A table below [`equalize_threshold`] wants enough players to fill up. An
/// idle table at or above it offers its lowest-numbered players beyond the
/// threshold. Each provider deals its players round-robin over the wanting
/// tables, least hungry first, skipping those already satisfied.
pub fn equalize_tables(tables: &[TableDescriptor]) -> Vec<EqualizeMove> {
    let mut wants = Vec::new();
    let mut providers = Vec::new();
    for table in tables {
        let threshold = equalize_threshold(table.max_players);
        let count = table.player_count();
        if count < threshold {
            wants.push(Want {
                id: table.id,
                remaining: table.max_players - count,
            });
        } else if !table.running {
            let mut offered = table.players.clone();
            offered.sort_unstable();
            offered.truncate(count - threshold);
            providers.push((table.id, offered));
        }
    }

    let mut moves = Vec::new();
    if wants.is_empty() {
        return moves;
    }

    let mut cursor = 0;
    for (from, offered) in providers {
        wants.sort_by_key(|want| want.remaining);
        if wants.iter().all(|want| want.remaining == 0) {
            break;
        }

        let mut offered = offered.into_iter().peekable();
        while offered.peek().is_some() {
            let mut distributed = false;
            let len = wants.len();
            for _ in 0..len {
                let want = &mut wants[cursor];
                cursor = (cursor + 1) % len;
                if want.remaining == 0 {
                    continue;
                }
                let Some(player) = offered.next() else {
                    break;
                };
                want.remaining -= 1;
                moves.push(EqualizeMove {
                    from,
                    to: want.id,
                    player,
                });
                distributed = true;
                if offered.peek().is_none() {
                    break;
                }
            }
            if !distributed {
                break;
            }
        }
    }

    moves
}
