//! Tournament data models.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};
use crate::{
    Chips,
    table::{DEFAULT_TABLE_BUY_IN, PlayerId, TableId, TableSpec},
};

/// Tournament ID type
pub type TournamentId = i64;

/// Format accepted by [`parse_schedule_time`]
pub const SCHEDULE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Tournament lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentState {
    /// Scheduled, registration not open yet
    Announced,
    /// Accepting registrations
    Registering,
    /// Tables are playing
    Running,
    /// One player left
    Complete,
}

impl fmt::Display for TournamentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentState::Announced => write!(f, "announced"),
            TournamentState::Registering => write!(f, "registering"),
            TournamentState::Running => write!(f, "running"),
            TournamentState::Complete => write!(f, "complete"),
        }
    }
}

/// How payouts are decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeSpecs {
    /// Front-loaded payouts from [`prizes_algorithm`](super::prizes::prizes_algorithm)
    Algorithm,
    /// Payouts are settled by the host
    External,
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Tournament serial number
    pub serial: TournamentId,
    /// Tournament name
    pub name: String,
    /// One-line description
    pub description_short: String,
    /// Full description
    pub description_long: String,
    /// Players needed to start a sit-and-go; rounded up to full tables at start
    pub players_quota: usize,
    /// Game variant played at every table
    pub variant: String,
    /// Betting structure played at every table
    pub betting_structure: String,
    /// Seats at each table
    pub seats_per_table: usize,
    /// Start as soon as the quota is reached
    pub sit_and_go: bool,
    /// Registration opens after this instant
    pub register_time: DateTime<Utc>,
    /// Tournament may start after this instant
    pub start_time: DateTime<Utc>,
    /// Minutes between breaks
    pub breaks_interval_mins: u32,
    /// Seconds during which rebuys are allowed
    pub rebuy_delay_secs: u32,
    /// Add-on chip amount (0 disables add-ons)
    pub add_on: Chips,
    /// Minutes after start at which the add-on is offered
    pub add_on_delay_mins: u32,
    /// Payout policy
    pub prize_specs: PrizeSpecs,
    /// Entry fee, the unit of the prize pool
    pub buy_in: Chips,
    /// Chips each player starts with
    pub starting_stack: Chips,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            serial: 1,
            name: "no name".to_string(),
            description_short: "nodescription_short".to_string(),
            description_long: "nodescription_long".to_string(),
            players_quota: 10,
            variant: "holdem".to_string(),
            betting_structure: "level-15-30-no-limit".to_string(),
            seats_per_table: 10,
            sit_and_go: true,
            register_time: DateTime::<Utc>::UNIX_EPOCH,
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            breaks_interval_mins: 60,
            rebuy_delay_secs: 0,
            add_on: 0,
            add_on_delay_mins: 60,
            prize_specs: PrizeSpecs::Algorithm,
            buy_in: 100,
            starting_stack: DEFAULT_TABLE_BUY_IN,
        }
    }
}

impl TournamentConfig {
    /// Create a sit-and-go that starts once `players_quota` players registered
    pub fn sit_and_go(name: &str, players_quota: usize, seats_per_table: usize) -> Self {
        Self {
            name: name.to_string(),
            players_quota,
            seats_per_table,
            ..Self::default()
        }
    }

    /// Create a tournament that opens registration and starts at fixed times
    pub fn scheduled(
        name: &str,
        seats_per_table: usize,
        register_time: DateTime<Utc>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.to_string(),
            seats_per_table,
            sit_and_go: false,
            register_time,
            start_time,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> TournamentResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.seats_per_table < 2 || self.seats_per_table > 23 {
            return Err(TournamentError::InvalidConfig(
                "Seats per table must be between 2 and 23".to_string(),
            ));
        }

        if self.players_quota == 0 {
            return Err(TournamentError::InvalidConfig(
                "Players quota must be greater than 0".to_string(),
            ));
        }

        if self.buy_in < 0 {
            return Err(TournamentError::InvalidConfig(
                "Buy-in must not be negative".to_string(),
            ));
        }

        if self.starting_stack <= 0 {
            return Err(TournamentError::InvalidConfig(
                "Starting stack must be greater than 0".to_string(),
            ));
        }

        self.table_spec()
            .validate()
            .map_err(TournamentError::InvalidConfig)
    }

    /// Specification of the tables this tournament plays on
    pub fn table_spec(&self) -> TableSpec {
        TableSpec {
            variant: self.variant.clone(),
            betting_structure: self.betting_structure.clone(),
            max_players: self.seats_per_table,
            buy_in: self.starting_stack,
        }
    }
}

/// Parse a `YYYY/MM/DD HH:MM` schedule time, interpreted as UTC
pub fn parse_schedule_time(value: &str) -> TournamentResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, SCHEDULE_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TournamentError::InvalidConfig(format!("bad time {value:?}: {e}")))
}

/// What the host should do after a hand ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Keep dealing
    Continue,
    /// The tournament is over
    Finished,
}

/// Winner's final stack did not match the chips put in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingMismatch {
    pub player: PlayerId,
    pub actual: Chips,
    pub expected: Chips,
}

/// Tournament information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentInfo {
    /// Tournament serial
    pub id: TournamentId,
    /// Tournament name
    pub name: String,
    /// Current state
    pub state: TournamentState,
    /// Whether registration is open
    pub can_register: bool,
    /// Players quota (rounded up to full tables once running)
    pub players_quota: usize,
    /// Registered players, in registration order
    pub registered: Vec<PlayerId>,
    /// Eliminated players, most recent first
    pub eliminated: Vec<PlayerId>,
    /// Open tables, in creation order
    pub table_ids: Vec<TableId>,
    /// Players currently seated across all open tables
    pub seated_count: usize,
    /// Started at timestamp
    pub started_at: Option<DateTime<Utc>>,
    /// Finished at timestamp
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config_is_valid_sit_and_go() {
        let config = TournamentConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.sit_and_go);
        assert_eq!(config.players_quota, 10);
        assert_eq!(config.seats_per_table, 10);
        assert_eq!(config.prize_specs, PrizeSpecs::Algorithm);
    }

    #[test]
    fn test_sit_and_go_config() {
        let config = TournamentConfig::sit_and_go("Test SNG", 18, 9);
        assert_eq!(config.name, "Test SNG");
        assert_eq!(config.players_quota, 18);
        assert_eq!(config.seats_per_table, 9);
    }

    #[test]
    fn test_validate_rejects_tiny_tables() {
        let config = TournamentConfig::sit_and_go("Heads up only", 2, 1);
        assert!(matches!(
            config.validate(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_table_spec_uses_starting_stack() {
        let config = TournamentConfig {
            starting_stack: 3000,
            ..TournamentConfig::sit_and_go("Deep", 9, 9)
        };
        let spec = config.table_spec();
        assert_eq!(spec.buy_in, 3000);
        assert_eq!(spec.max_players, 9);
        assert_eq!(spec.variant, "holdem");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            TournamentConfig::from_json(r#"{"name": "Friday", "seats_per_table": 6}"#).unwrap();
        assert_eq!(config.name, "Friday");
        assert_eq!(config.seats_per_table, 6);
        assert_eq!(config.players_quota, 10);
    }

    #[test]
    fn test_validate_rejects_unnamed_variant() {
        let config = TournamentConfig {
            variant: String::new(),
            ..TournamentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(TournamentConfig::from_json(r#"{"seats_per_table": 0}"#).is_err());
        assert!(TournamentConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_schedule_time() {
        let parsed = parse_schedule_time("2026/10/19 20:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 19, 20, 30, 0).unwrap());
        assert!(parse_schedule_time("tomorrow").is_err());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TournamentState::Registering.to_string(), "registering");
        assert_eq!(TournamentState::Complete.to_string(), "complete");
    }
}
