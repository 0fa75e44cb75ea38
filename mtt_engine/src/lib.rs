//! # MTT Engine
//!
//! Multi-table poker tournament orchestration.
//!
//! A tournament takes registrations, opens as many tables as its entrants
//! need, and keeps them balanced as players bust: short tables are broken
//! into the others and well-filled tables hand players to short-handed ones.
//! When one player is left the prize pool is paid out by finishing place.
//!
//! The poker itself is played by a single-table engine behind the
//! [`table::PokerTable`] trait. [`table::MemoryTable`] tracks only seats and
//! chips, which is all the tournament looks at.
//!
//! ## Core Modules
//!
//! - [`table`]: Table collaborator interface and the in-memory table
//! - [`tournament`]: Lifecycle, rebalancing, prizes and the async actor
//!
//! ## Example
//!
//! ```
//! use mtt_engine::tournament::prizes_algorithm;
//!
//! // 4 players at 100 each: winner takes all.
//! assert_eq!(prizes_algorithm(4, 100), vec![400]);
//! ```

/// Table collaborator interface and the in-memory table.
pub mod table;

/// Tournament lifecycle, rebalancing, prizes and hosting.
pub mod tournament;
pub use tournament::{
    Tournament, TournamentConfig, TournamentError, TournamentHandle, TournamentManager,
    TournamentState,
};

/// Chip amounts
pub type Chips = i64;
