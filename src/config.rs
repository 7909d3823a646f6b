//! Tunable game rules, loaded from RON.
//!
//! Every field has a default matching the shipped game, so a config file only
//! needs to mention what it changes:
//!
//! ```ron
//! (max_days: 20, secret_popup: Always, mission_weights: (cocktail: 6))
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TavernConfig {
    /// Ledger balance on day 1. Negative = starting debt.
    pub starting_balance: i64,
    pub max_days: u32,
    pub day_length_secs: f32,
    /// Added to every day once Extra Time is bought.
    pub extra_time_secs: f32,
    pub skip_cost: u32,
    /// Mission draws before the plain cocktail fallback kicks in.
    pub retry_budget: u32,
    pub consolation_reward: u32,
    pub secret_bonus: u32,
    pub medium_multiplier_pct: u32,
    pub hard_multiplier_pct: u32,
    pub secret_popup: SecretPopupPolicy,
    pub mission_weights: MissionWeights,
    /// Fixed seed for the mission RNG. `None` = seeded from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for TavernConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            max_days: MAX_DAYS,
            day_length_secs: DAY_LENGTH_SECS,
            extra_time_secs: EXTRA_TIME_SECS,
            skip_cost: SKIP_COST,
            retry_budget: MISSION_RETRY_BUDGET,
            consolation_reward: CONSOLATION_REWARD,
            secret_bonus: SECRET_BONUS,
            medium_multiplier_pct: MEDIUM_MULTIPLIER_PCT,
            hard_multiplier_pct: HARD_MULTIPLIER_PCT,
            secret_popup: SecretPopupPolicy::default(),
            mission_weights: MissionWeights::default(),
            rng_seed: None,
        }
    }
}

impl TavernConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: TavernConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_days == 0 {
            return Err(ConfigError::Invalid("max_days must be at least 1".into()));
        }
        if !(self.day_length_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "day_length_secs must be positive, got {}",
                self.day_length_secs
            )));
        }
        if self.extra_time_secs < 0.0 {
            return Err(ConfigError::Invalid("extra_time_secs cannot be negative".into()));
        }
        if self.retry_budget == 0 {
            return Err(ConfigError::Invalid("retry_budget must be at least 1".into()));
        }
        let total: u32 = MissionType::ALL
            .iter()
            .map(|t| self.mission_weights.weight(*t))
            .sum();
        if total == 0 {
            return Err(ConfigError::Invalid("all mission weights are zero".into()));
        }
        Ok(())
    }

    /// Length of a day of service given the purchased upgrades.
    pub fn day_length(&self, upgrades: &Upgrades) -> f32 {
        if upgrades.extra_time {
            self.day_length_secs + self.extra_time_secs
        } else {
            self.day_length_secs
        }
    }
}
