// ABOUTME: Progression trigger deciding when a shortlist is due for a new generation
// ABOUTME: Eligible after seven calendar days or three new logs, whichever comes first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ProgressionConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a progression check came out the way it did
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionReason {
    /// Program has no plan yet; only initial selection applies
    NoPriorPlan,
    /// Enough calendar days elapsed since the shortlist was generated
    DaysElapsed,
    /// Enough new logs were recorded since the shortlist was generated
    LogsRecorded,
    /// Neither threshold reached
    NotYetDue,
}

/// Outcome of a progression eligibility check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressionCheck {
    /// Whether the program should progress now
    pub should_progress: bool,
    /// Calendar days since the shortlist was generated
    pub days_since_plan: Option<i64>,
    /// Logs recorded since the shortlist was generated
    pub logs_since_plan: Option<u32>,
    /// Deciding rule
    pub reason: ProgressionReason,
}

/// Decide whether a program is due for progression
///
/// `shortlist_generated_at` is `None` when the program has no plan, in which
/// case progression never triggers regardless of `logs_since_plan`.
#[must_use]
pub fn check_progression(
    shortlist_generated_at: Option<DateTime<Utc>>,
    logs_since_plan: u32,
    now: DateTime<Utc>,
    config: &ProgressionConfig,
) -> ProgressionCheck {
    let Some(generated_at) = shortlist_generated_at else {
        return ProgressionCheck {
            should_progress: false,
            days_since_plan: None,
            logs_since_plan: None,
            reason: ProgressionReason::NoPriorPlan,
        };
    };

    let days_since_plan = (now.date_naive() - generated_at.date_naive()).num_days();
    let reason = if days_since_plan >= config.days_threshold {
        ProgressionReason::DaysElapsed
    } else if logs_since_plan >= config.logs_threshold {
        ProgressionReason::LogsRecorded
    } else {
        ProgressionReason::NotYetDue
    };

    ProgressionCheck {
        should_progress: reason != ProgressionReason::NotYetDue,
        days_since_plan: Some(days_since_plan),
        logs_since_plan: Some(logs_since_plan),
        reason,
    }
}
