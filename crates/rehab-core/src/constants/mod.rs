// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Symptom score bounds, trend window, adherence, bucket tiers, and cache defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Rule thresholds live here so every crate in the workspace reads the same
//! numbers. Anything an operator may tune at runtime is also exposed through
//! the engine configuration, which uses these values as defaults.

/// Advice cache defaults
pub mod cache;
/// Plan selection and progression thresholds
pub mod progression;

/// Symptom score bounds
pub mod symptom_scores {
    /// Lowest score for pain, stiffness and swelling
    pub const MIN_SCORE: u8 = 0;
    /// Highest score for pain, stiffness and swelling
    pub const MAX_SCORE: u8 = 10;
}

/// Trend analysis window and thresholds
pub mod trend {
    /// Number of most recent logs considered
    pub const WINDOW_SIZE: usize = 7;
    /// Delta at or below which a metric counts as improving
    pub const IMPROVING_DELTA: f64 = -1.0;
    /// Delta at or above which a metric counts as worse
    pub const WORSE_DELTA: f64 = 1.0;
}

/// Streak and adherence rules
pub mod adherence {
    /// Largest gap in days between two logs that keeps a streak alive
    pub const MAX_STREAK_GAP_DAYS: i64 = 2;
    /// Days in one summary week
    pub const WEEK_DAYS: i64 = 7;
    /// Days covered by the weekly summary
    pub const SUMMARY_WINDOW_DAYS: i64 = 14;
}

/// Bucket slug vocabulary
pub mod buckets {
    /// Mobility tier prefix, retained verbatim across progressions
    pub const MOBILITY: &str = "mobility";
    /// Isometric tier prefix
    pub const ISOMETRIC: &str = "isometric";
    /// Activation tier prefix
    pub const ACTIVATION: &str = "activation";
    /// Strength tier prefix
    pub const STRENGTH: &str = "strength";
    /// Stability tier prefix
    pub const STABILITY: &str = "stability";
    /// Safe fallback mobility bucket
    pub const MOBILITY_GENERAL: &str = "mobility_general";
    /// Safe fallback isometric bucket
    pub const ISOMETRIC_GENERAL: &str = "isometric_general";
    /// Buckets used whenever pattern mapping cannot produce a safe set
    pub const SAFE_FALLBACK: [&str; 2] = [MOBILITY_GENERAL, ISOMETRIC_GENERAL];
}
