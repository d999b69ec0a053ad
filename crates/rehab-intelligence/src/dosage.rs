// ABOUTME: Trend-driven dosage adjustment and dosage text rendering
// ABOUTME: Keeps strength and isometric sets inside their safety bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rehab_core::constants::buckets::{ISOMETRIC, STRENGTH};
use rehab_core::constants::progression::{
    MAX_SETS, MIN_SETS, REPS_REGRESSION_FLOOR, REPS_STEP_IMPROVING, REPS_STEP_STABLE,
    REPS_STEP_WORSE,
};
use rehab_core::models::{Dosage, Trend};

/// Whether dosage for a bucket is adjusted between generations
///
/// Accepts either a slug (`strength_quads`) or a label ("Quads Strength").
#[must_use]
pub fn is_progressive_bucket(bucket: &str) -> bool {
    let bucket = bucket.to_lowercase();
    bucket.contains(STRENGTH) || bucket.contains(ISOMETRIC)
}

/// Adjust one dosage for a trend
///
/// Non-progressive buckets pass through unchanged. For strength and
/// isometric work, sets take priority over reps and always end in
/// `MIN_SETS..=MAX_SETS`.
#[must_use]
pub fn adjust_dosage(dosage: &Dosage, bucket: &str, trend: Trend) -> Dosage {
    if !is_progressive_bucket(bucket) {
        return dosage.clone();
    }

    let mut adjusted = dosage.clone();
    match trend {
        Trend::Improving => match adjusted.sets {
            Some(sets) if sets < MAX_SETS => adjusted.sets = Some(sets + 1),
            _ => {
                if let Some(reps) = adjusted.reps {
                    adjusted.reps = Some(reps + REPS_STEP_IMPROVING);
                }
            }
        },
        Trend::Worse => match adjusted.sets {
            Some(sets) if sets > MIN_SETS => adjusted.sets = Some(sets - 1),
            _ => {
                if let Some(reps) = adjusted.reps.filter(|&r| r > REPS_REGRESSION_FLOOR) {
                    adjusted.reps = Some(reps - REPS_STEP_WORSE);
                }
            }
        },
        Trend::Stable => {
            if let Some(reps) = adjusted.reps {
                adjusted.reps = Some(reps + REPS_STEP_STABLE);
            }
        }
    }

    adjusted.sets = adjusted.sets.map(|s| s.clamp(MIN_SETS, MAX_SETS));
    adjusted
}

/// Render a dosage for display
///
/// Prefers `sets x reps`, then `sets x hold`, then `sets x time`, then a
/// bare time value. Rest and notes follow as comma-separated clauses.
#[must_use]
pub fn render_dosage_text(dosage: &Dosage) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(3);

    let primary = match (dosage.sets, dosage.reps, dosage.hold_seconds, dosage.time_seconds) {
        (Some(sets), Some(reps), _, _) => Some(format!("{sets} x {reps} reps")),
        (Some(sets), None, Some(hold), _) => Some(format!("{sets} x {hold}s hold")),
        (Some(sets), None, None, Some(time)) => Some(format!("{sets} x {}", format_seconds(time))),
        (None, Some(reps), _, _) => Some(format!("{reps} reps")),
        (None, None, hold, time) => time.or(hold).map(format_seconds),
        (Some(sets), None, None, None) => Some(format!("{sets} sets")),
    };
    clauses.extend(primary);

    if let Some(rest) = dosage.rest_seconds {
        clauses.push(format!("rest {}", format_seconds(rest)));
    }
    if let Some(notes) = dosage.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        clauses.push(notes.to_owned());
    }

    clauses.join(", ")
}

/// Format seconds as `45s`, `2 min` or `2 min 30s`
fn format_seconds(seconds: u32) -> String {
    let (minutes, rest) = (seconds / 60, seconds % 60);
    match (minutes, rest) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m} min"),
        (m, s) => format!("{m} min {s}s"),
    }
}
