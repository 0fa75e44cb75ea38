//! Tournament error types.

use thiserror::Error;

use super::models::{TournamentId, TournamentState};
use crate::table::{PlayerId, TableError, TableId};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Cannot change from state {from} to state {to}")]
    InvalidTransition {
        from: TournamentState,
        to: TournamentState,
    },

    #[error("Tournament not in correct state: expected {expected}, got {actual}")]
    InvalidState {
        expected: TournamentState,
        actual: TournamentState,
    },

    #[error("Registration is closed")]
    RegistrationClosed,

    #[error("Player {0} already registered")]
    AlreadyRegistered(PlayerId),

    #[error("Player {0} is not registered")]
    NotRegistered(PlayerId),

    #[error("Cannot start without entrants")]
    NoEntrants,

    #[error("No free seat for player {0}")]
    NoSeatAvailable(PlayerId),

    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    #[error("Duplicate table id: {0}")]
    DuplicateTable(TableId),

    #[error("Cannot move a player from table {0} to itself")]
    SameTable(TableId),

    #[error("Tournament already exists: {0}")]
    DuplicateTournament(TournamentId),

    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tournament is closed")]
    Closed,
}

pub type TournamentResult<T> = Result<T, TournamentError>;
