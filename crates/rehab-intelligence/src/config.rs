// ABOUTME: Rule configuration for trend analysis and plan progression
// ABOUTME: Groups tunable thresholds with defaults taken from the core constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration
//!
//! Thresholds the rule components read at runtime. Defaults mirror
//! `rehab_core::constants`; the engine configuration may override them from
//! the environment.

use rehab_core::constants::{progression, trend};
use serde::{Deserialize, Serialize};

/// Configuration shared by the rule components
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntelligenceConfig {
    /// Trend analysis settings
    pub trend: TrendConfig,
    /// Plan progression settings
    pub progression: ProgressionConfig,
}

/// Trend analysis settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendConfig {
    /// Most recent logs considered by the analyzer
    pub window_size: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_size: trend::WINDOW_SIZE,
        }
    }
}

/// Plan progression settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressionConfig {
    /// Calendar days after which a shortlist becomes eligible for progression
    pub days_threshold: i64,
    /// New logs after which a shortlist becomes eligible for progression
    pub logs_threshold: u32,
    /// Exercises chosen per generation
    pub max_exercises: usize,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            days_threshold: progression::PROGRESSION_DAYS,
            logs_threshold: progression::PROGRESSION_LOGS,
            max_exercises: progression::MAX_SELECTED_EXERCISES,
        }
    }
}
