//! Simulator configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;

use mtt_engine::Chips;

/// Complete simulator configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of synthetic entrants
    pub players: usize,
    /// Seats at each table
    pub seats: usize,
    /// Entry fee paid into the prize pool
    pub buy_in: Chips,
    /// Seed for seating and hand outcomes
    pub seed: u64,
    /// Chance that a player other than the hand winner busts in a hand
    pub bust_probability: f64,
    /// Hands dealt before the simulation gives up
    pub max_hands: usize,
    /// Tournament configuration file (JSON)
    pub config_file: Option<PathBuf>,
}

impl SimConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `players_override` - Optional entrant count override (from CLI args)
    /// * `seats_override` - Optional seats per table override (from CLI args)
    /// * `seed_override` - Optional seed override (from CLI args)
    /// * `config_file` - Optional tournament configuration file (from CLI args)
    pub fn from_env(
        players_override: Option<usize>,
        seats_override: Option<usize>,
        seed_override: Option<u64>,
        config_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let seed = seed_override
            .or_else(|| {
                std::env::var("MTT_SEED")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or_else(rand::random);

        let config = SimConfig {
            players: players_override.unwrap_or_else(|| parse_env_or("MTT_PLAYERS", 27)),
            seats: seats_override.unwrap_or_else(|| parse_env_or("MTT_SEATS", 9)),
            buy_in: parse_env_or("MTT_BUY_IN", 100),
            seed,
            bust_probability: parse_env_or("MTT_BUST_PROBABILITY", 0.15),
            max_hands: parse_env_or("MTT_MAX_HANDS", 100_000),
            config_file: config_file.or_else(|| std::env::var("MTT_CONFIG").ok().map(PathBuf::from)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::Invalid {
                var: "MTT_PLAYERS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if !(2..=23).contains(&self.seats) {
            return Err(ConfigError::Invalid {
                var: "MTT_SEATS".to_string(),
                reason: "Must be between 2 and 23".to_string(),
            });
        }

        if self.buy_in < 0 {
            return Err(ConfigError::Invalid {
                var: "MTT_BUY_IN".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        if !(self.bust_probability > 0.0 && self.bust_probability <= 1.0) {
            return Err(ConfigError::Invalid {
                var: "MTT_BUST_PROBABILITY".to_string(),
                reason: format!("Must be in (0, 1], got {}", self.bust_probability),
            });
        }

        if self.max_hands == 0 {
            return Err(ConfigError::Invalid {
                var: "MTT_MAX_HANDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimConfig {
        SimConfig {
            players: 27,
            seats: 9,
            buy_in: 100,
            seed: 1,
            bust_probability: 0.15,
            max_hands: 1000,
            config_file: None,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "MTT_SEATS".to_string(),
            reason: "Must be between 2 and 23".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MTT_SEATS"));
        assert!(msg.contains("between 2 and 23"));
    }

    #[test]
    fn test_default_like_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_single_player() {
        let config = SimConfig {
            players: 1,
            ..config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { var, .. }) if var == "MTT_PLAYERS"
        ));
    }

    #[test]
    fn test_config_validation_bust_probability() {
        for bust_probability in [0.0, -0.5, 1.5, f64::NAN] {
            let config = SimConfig {
                bust_probability,
                ..config()
            };
            assert!(config.validate().is_err(), "{bust_probability} accepted");
        }
    }

    #[test]
    fn test_overrides_win() {
        let config = SimConfig::from_env(Some(6), Some(3), Some(99), None).unwrap();
        assert_eq!(config.players, 6);
        assert_eq!(config.seats, 3);
        assert_eq!(config.seed, 99);
    }
}
