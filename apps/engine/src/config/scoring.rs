//! Scoring configuration.
//!
//! Settlement reads per-category base multipliers and the point-to-coin
//! exchange rate from here.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "multipliers": {"diao": 1, "kaiZhu": 2, "seYang": 2},
//!   "exchangeRate": 10
//! }
//! ```

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::settlement::ScoreCategory;
use crate::errors::domain::DomainError;

pub const DEFAULT_MULTIPLIER: i64 = 1;
pub const DEFAULT_EXCHANGE_RATE: i64 = 10;

/// Base multiplier applied to every category in [`ScoringConfig::from_env`].
pub const ENV_BASE_MULTIPLIER: &str = "MADIAO_BASE_MULTIPLIER";
pub const ENV_EXCHANGE_RATE: &str = "MADIAO_EXCHANGE_RATE";

fn default_multiplier() -> i64 {
    DEFAULT_MULTIPLIER
}

fn default_exchange_rate() -> i64 {
    DEFAULT_EXCHANGE_RATE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMultipliers {
    #[serde(default = "default_multiplier")]
    pub diao: i64,
    #[serde(default = "default_multiplier")]
    pub kai_zhu: i64,
    #[serde(default = "default_multiplier")]
    pub qiao_men: i64,
    #[serde(default = "default_multiplier")]
    pub se_yang: i64,
    #[serde(default = "default_multiplier")]
    pub kai_chong: i64,
    #[serde(default = "default_multiplier")]
    pub duo_jin: i64,
}

impl CategoryMultipliers {
    pub const fn uniform(m: i64) -> Self {
        Self {
            diao: m,
            kai_zhu: m,
            qiao_men: m,
            se_yang: m,
            kai_chong: m,
            duo_jin: m,
        }
    }

    pub fn get(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::Diao => self.diao,
            ScoreCategory::KaiZhu => self.kai_zhu,
            ScoreCategory::QiaoMen => self.qiao_men,
            ScoreCategory::SeYang => self.se_yang,
            ScoreCategory::KaiChong => self.kai_chong,
            ScoreCategory::DuoJin => self.duo_jin,
        }
    }
}

impl Default for CategoryMultipliers {
    fn default() -> Self {
        Self::uniform(DEFAULT_MULTIPLIER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default)]
    pub multipliers: CategoryMultipliers,
    /// Coins per settled point.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            multipliers: CategoryMultipliers::default(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

impl ScoringConfig {
    /// Build from optional JSON, falling back to defaults on malformed input.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_BASE_MULTIPLIER) {
            config.multipliers = CategoryMultipliers::uniform(positive(ENV_BASE_MULTIPLIER, &raw)?);
        }
        if let Some(raw) = lookup(ENV_EXCHANGE_RATE) {
            config.exchange_rate = positive(ENV_EXCHANGE_RATE, &raw)?;
        }
        Ok(config)
    }
}

fn positive(key: &str, raw: &str) -> Result<i64, DomainError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::config(format!("{key} must be an integer, got '{raw}'")))?;
    if value <= 0 {
        return Err(DomainError::config(format!(
            "{key} must be positive, got {value}"
        )));
    }
    Ok(value)
}
