//! Multi-table tournaments.
//!
//! This module provides:
//! - `Tournament`: the lifecycle, registrations and eliminations of one tournament
//! - Table breaking and seat equalization plans
//! - Prize pool distribution
//! - `TournamentActor` and `TournamentManager` for hosting tournaments on tokio
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use mtt_engine::table::MemoryTableFactory;
//! use mtt_engine::tournament::{NoopObserver, Tournament, TournamentConfig, TournamentState};
//!
//! let config = TournamentConfig::sit_and_go("Sunday Special", 2, 2);
//! let mut tournament = Tournament::new(
//!     config,
//!     Box::new(MemoryTableFactory::new()),
//!     Box::new(NoopObserver),
//!     Utc::now(),
//! )
//! .unwrap();
//!
//! tournament.register(1, Utc::now()).unwrap();
//! tournament.register(2, Utc::now()).unwrap();
//! assert_eq!(tournament.state(), TournamentState::Running);
//! assert_eq!(tournament.prizes(), Some(vec![200]));
//! ```

pub mod actor;
pub mod balancer;
pub mod controller;
pub mod errors;
pub mod manager;
pub mod messages;
pub mod models;
pub mod observer;
pub mod prizes;
pub mod transfer;

pub use actor::{TournamentActor, TournamentHandle};
pub use balancer::{
    BreakMove, EqualizeMove, TableDescriptor, break_tables, equalize_tables, equalize_threshold,
};
pub use controller::Tournament;
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use messages::{TableOperation, TournamentMessage};
pub use models::{
    AccountingMismatch, PrizeSpecs, SCHEDULE_TIME_FORMAT, TournamentConfig, TournamentId,
    TournamentInfo, TournamentState, TurnOutcome, parse_schedule_time,
};
pub use observer::{NoopObserver, TournamentObserver};
pub use prizes::{paid_places, prizes_algorithm};
pub use transfer::move_player;
