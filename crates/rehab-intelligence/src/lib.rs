// ABOUTME: Deterministic rule pipeline for adaptive rehabilitation plans
// ABOUTME: Trend analysis, pattern mapping, plan selection/progression, and adherence tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rehab Intelligence
//!
//! Pure, synchronous rule components. Given the same log history they make
//! exactly the same decisions; none of them perform I/O apart from the
//! read-only catalog lookup used by the plan selector.
//!
//! Control flow for one new log:
//!
//! 1. [`TrendAnalyzer`] classifies the last seven logs
//! 2. [`check_progression`] decides whether the shortlist is due
//! 3. [`PlanSelector`] progresses the shortlist, or selects the first one
//!    from [`PatternMapper`] buckets
//! 4. [`AdherenceTracker`] updates the logging streak

/// Streaks, adherence rate and weekly summaries
pub mod adherence;
/// Exercise catalog lookup trait
pub mod catalog;
/// Tunable rule thresholds
pub mod config;
/// Dosage adjustment and rendering
pub mod dosage;
/// Inferred pattern to bucket mapping
pub mod pattern_mapper;
/// Initial selection and progression of shortlists
pub mod plan_selector;
/// Progression eligibility
pub mod progression;
/// Symptom trend classification
pub mod trend_analyzer;

pub use adherence::{AdherenceTracker, StreakChange, StreakUpdate, WeekAverages, WeeklySummary};
pub use catalog::ExerciseCatalog;
pub use config::{IntelligenceConfig, ProgressionConfig, TrendConfig};
pub use dosage::{adjust_dosage, is_progressive_bucket, render_dosage_text};
pub use pattern_mapper::{
    default_rules, ConfidenceLevel, PatternInference, PatternMapper, PatternMapping, PatternRule,
};
pub use plan_selector::{transform_bucket, transform_buckets, PlanSelector, ProgressionOutcome};
pub use progression::{check_progression, ProgressionCheck, ProgressionReason};
pub use trend_analyzer::{classify, TrendAnalysis, TrendAnalyzer};
