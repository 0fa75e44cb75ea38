//! Table collaborator interface and an in-memory implementation.
//!
//! This module provides:
//! - `PokerTable`: what the tournament needs from a single-table engine
//! - `TableFactory`: how the tournament opens new tables
//! - `TableSpec`: variant, betting structure and seat count of a table
//! - `MemoryTable`: a chip-and-seat only table for tests and simulation
//!
//! ## Example
//!
//! ```
//! use mtt_engine::table::{MemoryTableFactory, PokerTable, TableFactory, TableSpec};
//!
//! let mut factory = MemoryTableFactory::new();
//! let mut table = factory.create_table(&TableSpec::default());
//! table.add_player(42).unwrap();
//! table.pay_buy_in(42, table.buy_in()).unwrap();
//! assert_eq!(table.player_count(), 1);
//! ```

pub mod config;
pub mod errors;
pub mod memory;
pub mod seating;
pub mod traits;

pub use config::{DEFAULT_TABLE_BUY_IN, TableSpec};
pub use errors::{TableError, TableResult};
pub use memory::{MemoryTable, MemoryTableFactory};
pub use seating::SeatRandomizer;
pub use traits::{PlayerInfo, PokerTable, TableFactory};

/// Table ID type
pub type TableId = i64;

/// Player ID type
pub type PlayerId = i64;
