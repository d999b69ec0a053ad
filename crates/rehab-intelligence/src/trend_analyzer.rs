// ABOUTME: Symptom trend classification over a rolling window of daily logs
// ABOUTME: Compares the latest pain/stiffness scores against the window mean
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::TrendConfig;
use rehab_core::constants::trend::{IMPROVING_DELTA, WORSE_DELTA};
use rehab_core::models::{SymptomLog, Trend};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one trend analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendAnalysis {
    /// Classified trend
    pub trend: Trend,
    /// Pain score of the most recent log
    pub current_pain: f64,
    /// Stiffness score of the most recent log
    pub current_stiffness: f64,
    /// Mean pain over the window, current log included
    pub baseline_pain: f64,
    /// Mean stiffness over the window, current log included
    pub baseline_stiffness: f64,
    /// `current_pain - baseline_pain`
    pub pain_delta: f64,
    /// `current_stiffness - baseline_stiffness`
    pub stiffness_delta: f64,
    /// Logs in the window
    pub log_count: usize,
    /// Days between the oldest and the newest log in the window
    pub days_since_window_start: i64,
}

/// Trend analyzer over the most recent logs of one program
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with the default seven-log window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom window
    #[must_use]
    pub const fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Analyze logs ordered most-recent-first
    ///
    /// Only the first `window_size` logs are used. Returns `None` when there
    /// is no log at all.
    #[must_use]
    pub fn analyze(&self, logs: &[SymptomLog]) -> Option<TrendAnalysis> {
        let window = &logs[..logs.len().min(self.config.window_size.max(1))];
        let (latest, oldest) = (window.first()?, window.last()?);

        let count = window.len() as f64;
        let baseline_pain = window.iter().map(|l| f64::from(l.pain)).sum::<f64>() / count;
        let baseline_stiffness =
            window.iter().map(|l| f64::from(l.stiffness)).sum::<f64>() / count;

        let current_pain = f64::from(latest.pain);
        let current_stiffness = f64::from(latest.stiffness);
        let pain_delta = current_pain - baseline_pain;
        let stiffness_delta = current_stiffness - baseline_stiffness;
        let trend = classify(pain_delta, stiffness_delta);

        debug!(
            program.id = %latest.program_id,
            trend = %trend,
            pain_delta,
            stiffness_delta,
            log_count = window.len(),
            "Classified symptom trend"
        );

        Some(TrendAnalysis {
            trend,
            current_pain,
            current_stiffness,
            baseline_pain,
            baseline_stiffness,
            pain_delta,
            stiffness_delta,
            log_count: window.len(),
            days_since_window_start: (latest.date - oldest.date).num_days().abs(),
        })
    }
}

/// Classify two deltas with the either-trigger rule
///
/// `Improving` is checked first, so a mixed signal (one metric down by a
/// point, the other up by a point) resolves to `Improving`.
#[must_use]
pub fn classify(pain_delta: f64, stiffness_delta: f64) -> Trend {
    if pain_delta <= IMPROVING_DELTA || stiffness_delta <= IMPROVING_DELTA {
        Trend::Improving
    } else if pain_delta >= WORSE_DELTA || stiffness_delta >= WORSE_DELTA {
        Trend::Worse
    } else {
        Trend::Stable
    }
}
