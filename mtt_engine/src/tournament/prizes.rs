//! Prize pool distribution.

use crate::Chips;

/// Number of paid places for a field of `entrants` players.
pub fn paid_places(entrants: usize) -> usize {
    match entrants {
        0..5 => 1,
        5..10 => 2,
        10..20 => 3,
        20..30 => 4,
        30..40 => 6,
        40..50 => entrants / 5,
        50..200 => entrants * 15 / 100,
        _ => entrants / 10,
    }
}

/// Split `entrants × buy_in` across the paid places.
///
/// The top places each take half of what is left until an even split of
/// the remainder would pay less than 2.5 buy-ins per place; the remaining
/// places then share it equally. Integer rounding leftovers go to first
/// place, so the payouts always sum to the whole pool and never increase
/// down the list.
pub fn prizes_algorithm(entrants: usize, buy_in: Chips) -> Vec<Chips> {
    let total = buy_in * entrants as Chips;
    let flat_threshold = buy_in * 5 / 2;

    let mut places = paid_places(entrants) as Chips;
    let mut money_left = total;
    let mut prizes = Vec::with_capacity(places as usize);

    while places > 0 {
        let share = money_left / places;
        if share < flat_threshold {
            prizes.extend(std::iter::repeat_n(share, places as usize));
            break;
        }
        money_left /= 2;
        places -= 1;
        prizes.push(money_left);
    }

    let rest = total - prizes.iter().sum::<Chips>();
    if let Some(first) = prizes.first_mut() {
        *first += rest;
    }

    prizes
}
