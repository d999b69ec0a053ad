// ABOUTME: Plan selection and progression constants
// ABOUTME: Shortlist sizes, progression trigger thresholds, and dosage bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Smallest shortlist a plan may carry
pub const MIN_SHORTLIST_LEN: usize = 2;

/// Exercises chosen per plan generation
pub const MAX_SELECTED_EXERCISES: usize = 3;

/// Days since the shortlist was generated that make a program eligible
pub const PROGRESSION_DAYS: i64 = 7;

/// New logs since the shortlist was generated that make a program eligible
pub const PROGRESSION_LOGS: u32 = 3;

/// Sets ceiling for strength and isometric work
pub const MAX_SETS: u32 = 4;

/// Sets floor for strength and isometric work
pub const MIN_SETS: u32 = 2;

/// Reps are only regressed while above this value
pub const REPS_REGRESSION_FLOOR: u32 = 5;

/// Reps added when the trend is improving and sets are capped
pub const REPS_STEP_IMPROVING: u32 = 2;

/// Reps removed when the trend is worse and sets are floored
pub const REPS_STEP_WORSE: u32 = 2;

/// Reps added when the trend is stable
pub const REPS_STEP_STABLE: u32 = 1;
