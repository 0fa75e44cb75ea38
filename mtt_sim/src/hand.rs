//! All-in confrontations standing in for real hands.

use mtt_engine::table::{PlayerId, PokerTable, TableResult};
use rand::{Rng, seq::IndexedRandom};

/// Deal one hand at `table`.
///
/// A random player wins the pot. Every other player either busts, with
/// probability `bust_probability`, or loses a tenth of their stack.
/// Returns the busted players.
pub fn play_hand<R: Rng + ?Sized>(
    table: &mut dyn PokerTable,
    rng: &mut R,
    bust_probability: f64,
) -> TableResult<Vec<PlayerId>> {
    let players = table.player_ids();
    if players.len() < 2 {
        return Ok(Vec::new());
    }
    let Some(&winner) = players.choose(&mut *rng) else {
        return Ok(Vec::new());
    };

    let mut pot = 0;
    let mut busted = Vec::new();
    for &player in players.iter().filter(|&&player| player != winner) {
        if rng.random_bool(bust_probability) {
            pot += table.clear_stack(player)?;
            busted.push(player);
        } else {
            let stack = table.clear_stack(player)?;
            let lost = stack / 10;
            table.pay_buy_in(player, stack - lost)?;
            pot += lost;
        }
    }
    table.pay_buy_in(winner, pot)?;

    log::debug!(
        "table {}: player {} wins {} chips, busting {:?}",
        table.id(),
        winner,
        pot,
        busted
    );
    Ok(busted)
}
