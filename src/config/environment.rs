// ABOUTME: Environment configuration for advice caching, formatter deadline, and rule thresholds
// ABOUTME: Parses REHAB_* variables into an EngineConfig, rejecting unparseable or zero values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based engine configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `REHAB_ADVICE_CACHE_TTL_SECS` | 3600 |
//! | `REHAB_ADVICE_CACHE_MAX_ENTRIES` | 1000 |
//! | `REHAB_ADVICE_CACHE_SWEEP_EVERY` | 50 |
//! | `REHAB_FORMATTER_TIMEOUT_MS` | 8000 |
//! | `REHAB_PROGRESSION_DAYS` | 7 |
//! | `REHAB_PROGRESSION_LOGS` | 3 |
//! | `REHAB_TREND_WINDOW` | 7 |

use crate::cache::AdviceCacheConfig;
use rehab_core::constants::cache::{
    DEFAULT_ADVICE_MAX_ENTRIES, DEFAULT_ADVICE_TTL_SECS, DEFAULT_FORMATTER_TIMEOUT_MS,
    DEFAULT_SWEEP_EVERY_INSERTS,
};
use rehab_core::constants::{progression, trend};
use rehab_core::errors::{AppError, AppResult};
use rehab_intelligence::{IntelligenceConfig, ProgressionConfig, TrendConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Advice cache TTL in seconds
pub const ENV_ADVICE_CACHE_TTL_SECS: &str = "REHAB_ADVICE_CACHE_TTL_SECS";
/// Advice cache LRU capacity
pub const ENV_ADVICE_CACHE_MAX_ENTRIES: &str = "REHAB_ADVICE_CACHE_MAX_ENTRIES";
/// Inserts between advice cache sweeps
pub const ENV_ADVICE_CACHE_SWEEP_EVERY: &str = "REHAB_ADVICE_CACHE_SWEEP_EVERY";
/// Advice formatter deadline in milliseconds
pub const ENV_FORMATTER_TIMEOUT_MS: &str = "REHAB_FORMATTER_TIMEOUT_MS";
/// Calendar days that make a shortlist due for progression
pub const ENV_PROGRESSION_DAYS: &str = "REHAB_PROGRESSION_DAYS";
/// New logs that make a shortlist due for progression
pub const ENV_PROGRESSION_LOGS: &str = "REHAB_PROGRESSION_LOGS";
/// Logs considered by the trend analyzer
pub const ENV_TREND_WINDOW: &str = "REHAB_TREND_WINDOW";

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Advice cache settings
    pub advice_cache: AdviceCacheConfig,
    /// Advice formatter deadline
    pub formatter_timeout: Duration,
    /// Rule thresholds
    pub intelligence: IntelligenceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advice_cache: AdviceCacheConfig::default(),
            formatter_timeout: Duration::from_millis(DEFAULT_FORMATTER_TIMEOUT_MS),
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set to a value that does not
    /// parse or is not positive
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            advice_cache: AdviceCacheConfig {
                ttl: Duration::from_secs(env_parse(
                    ENV_ADVICE_CACHE_TTL_SECS,
                    DEFAULT_ADVICE_TTL_SECS,
                )?),
                max_entries: env_parse(ENV_ADVICE_CACHE_MAX_ENTRIES, DEFAULT_ADVICE_MAX_ENTRIES)?,
                sweep_every: env_parse(ENV_ADVICE_CACHE_SWEEP_EVERY, DEFAULT_SWEEP_EVERY_INSERTS)?,
            },
            formatter_timeout: Duration::from_millis(env_parse(
                ENV_FORMATTER_TIMEOUT_MS,
                DEFAULT_FORMATTER_TIMEOUT_MS,
            )?),
            intelligence: IntelligenceConfig {
                trend: TrendConfig {
                    window_size: env_parse(ENV_TREND_WINDOW, trend::WINDOW_SIZE)?,
                },
                progression: ProgressionConfig {
                    days_threshold: env_parse(ENV_PROGRESSION_DAYS, progression::PROGRESSION_DAYS)?,
                    logs_threshold: env_parse(ENV_PROGRESSION_LOGS, progression::PROGRESSION_LOGS)?,
                    ..ProgressionConfig::default()
                },
            },
        };

        info!(
            advice_ttl_secs = config.advice_cache.ttl.as_secs(),
            advice_max_entries = config.advice_cache.max_entries,
            formatter_timeout_ms = u64::try_from(config.formatter_timeout.as_millis()).unwrap_or(u64::MAX),
            progression_days = config.intelligence.progression.days_threshold,
            progression_logs = config.intelligence.progression.logs_threshold,
            trend_window = config.intelligence.trend.window_size,
            "Loaded engine configuration"
        );
        Ok(config)
    }
}

/// Parse a positive numeric variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr + PartialOrd + Default,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    let value: T = raw.trim().parse().map_err(|e| {
        AppError::config(format!("Invalid {key} value '{raw}': {e}")).with_resource_id(key)
    })?;
    if value <= T::default() {
        return Err(
            AppError::config(format!("{key} must be greater than zero")).with_resource_id(key)
        );
    }
    Ok(value)
}
