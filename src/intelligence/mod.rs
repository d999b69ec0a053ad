// ABOUTME: Rule components re-exported from the intelligence crate
// ABOUTME: Trend analysis, pattern mapping, plan selection, progression trigger, adherence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Rule components
//!
//! The rules live in `rehab-intelligence` so they compile and test without
//! the async collaborator layer.

pub use rehab_intelligence::{
    adjust_dosage, check_progression, classify, default_rules, is_progressive_bucket,
    render_dosage_text, transform_bucket, transform_buckets, AdherenceTracker, ConfidenceLevel,
    ExerciseCatalog, IntelligenceConfig, PatternInference, PatternMapper, PatternMapping,
    PatternRule, PlanSelector, ProgressionCheck, ProgressionConfig, ProgressionOutcome,
    ProgressionReason, StreakChange, StreakUpdate, TrendAnalysis, TrendAnalyzer, TrendConfig,
    WeekAverages, WeeklySummary,
};
