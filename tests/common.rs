// ABOUTME: Shared test utilities for the rehabilitation plan engine integration tests
// ABOUTME: Date helpers, log and catalog builders, and quiet tracing setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `rehab_plan_engine`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rehab_plan_engine::models::{
    Dosage, DosagePresets, ExerciseCatalogEntry, NewSymptomLog, SymptomLog,
};
use std::env;
use std::sync::Once;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Program start day used across tests
pub fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

/// Calendar day `n` days after [`day0`]
pub fn day(n: i64) -> NaiveDate {
    day0() + Duration::days(n)
}

/// 09:00 UTC on day `n`
pub fn at(n: i64) -> DateTime<Utc> {
    at_hour(n, 9)
}

/// `hour`:00 UTC on day `n`
pub fn at_hour(n: i64, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(n).and_hms_opt(hour, 0, 0).unwrap())
}

/// Stored log for day `n`, created at 09:00 that day
pub fn log_on(program_id: Uuid, n: i64, pain: u8, stiffness: u8) -> SymptomLog {
    SymptomLog::from_new(NewSymptomLog::new(program_id, day(n), pain, stiffness), at(n))
}

/// Logs ordered most-recent-first from (pain, stiffness) pairs, one per day
///
/// The first pair is the most recent log.
pub fn window(program_id: Uuid, scores: &[(u8, u8)]) -> Vec<SymptomLog> {
    let newest = scores.len() as i64;
    scores
        .iter()
        .enumerate()
        .map(|(i, &(pain, stiffness))| log_on(program_id, newest - i as i64, pain, stiffness))
        .collect()
}

/// Active catalog entry with sets x reps presets
pub fn reps_entry(
    id: &str,
    bucket: &str,
    low: (u32, u32),
    moderate: (u32, u32),
) -> ExerciseCatalogEntry {
    ExerciseCatalogEntry {
        id: id.to_owned(),
        bucket_slug: bucket.to_owned(),
        name: id.replace('_', " "),
        presets: DosagePresets {
            low: Dosage::sets_reps(low.0, low.1),
            moderate: Dosage::sets_reps(moderate.0, moderate.1),
            high: None,
        },
        safety_notes: None,
        active: true,
    }
}
