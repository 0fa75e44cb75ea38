//! Random seat selection for players joining a table.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Picks free seats at random so nobody chooses where they sit.
#[derive(Debug, Clone)]
pub struct SeatRandomizer {
    rng: StdRng,
}

impl SeatRandomizer {
    /// Create a randomizer seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible randomizer
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Find a random available seat
    ///
    /// # Arguments
    ///
    /// * `occupied_seats` - Seat indices already taken
    /// * `max_seats` - Number of seats at the table
    ///
    /// # Returns
    ///
    /// * `Option<usize>` - Random free seat index or None if the table is full
    pub fn find_random_seat(&mut self, occupied_seats: &[usize], max_seats: usize) -> Option<usize> {
        let available_seats: Vec<usize> = (0..max_seats)
            .filter(|seat| !occupied_seats.contains(seat))
            .collect();

        available_seats.choose(&mut self.rng).copied()
    }
}

impl Default for SeatRandomizer {
    fn default() -> Self {
        Self::new()
    }
}
