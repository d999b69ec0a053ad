// ABOUTME: Adherence tracking: gap-tolerant logging streaks, adherence rate, weekly summary
// ABOUTME: Pure functions over log dates; the engine persists the resulting streak fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adherence Tracker
//!
//! A streak survives one skipped calendar day: two logs at most two days
//! apart extend it, a larger gap resets it to one. Same-day corrections never
//! count as a new day.

use chrono::NaiveDate;
use rehab_core::constants::adherence::{MAX_STREAK_GAP_DAYS, SUMMARY_WINDOW_DAYS, WEEK_DAYS};
use rehab_core::models::{Program, SymptomLog};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How the streak moved on a new log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// First log of the program
    Started,
    /// Gap of at most two days
    Extended,
    /// Gap larger than two days
    Reset,
    /// Log for a day that was already logged
    SameDay,
    /// Log for a day older than the most recent logged day
    Backfill,
}

/// Streak fields after one update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakUpdate {
    /// New current streak
    pub current_streak: u32,
    /// New longest streak
    pub longest_streak: u32,
    /// New most recent logged day
    pub last_logged_date: NaiveDate,
    /// Whole days between the new log and the previous most recent one
    pub days_between: Option<i64>,
    /// What happened
    pub change: StreakChange,
}

/// Mean symptom scores for one week-long bucket of logs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeekAverages {
    /// Mean pain
    pub avg_pain: f64,
    /// Mean stiffness
    pub avg_stiffness: f64,
    /// Logs counted
    pub days_logged: u32,
}

/// Two-week comparison of symptom scores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// Last seven days, today included
    pub this_week: WeekAverages,
    /// Eight to fourteen days back
    pub previous_week: WeekAverages,
    /// This week's mean pain minus last week's; negative is improvement
    pub avg_pain_change: f64,
    /// This week's mean stiffness minus last week's; negative is improvement
    pub avg_stiffness_change: f64,
    /// Days logged in the current week
    pub days_logged_this_week: u32,
}

/// Adherence tracking rules
pub struct AdherenceTracker;

impl AdherenceTracker {
    /// Apply one newly recorded log to a program's streak fields
    ///
    /// `previous_latest` is the most recent logged day before this log.
    #[must_use]
    pub fn update_streak(
        program: &Program,
        previous_latest: Option<NaiveDate>,
        new_date: NaiveDate,
    ) -> StreakUpdate {
        let Some(previous) = previous_latest else {
            return StreakUpdate {
                current_streak: 1,
                longest_streak: program.longest_streak.max(1),
                last_logged_date: new_date,
                days_between: None,
                change: StreakChange::Started,
            };
        };

        let days_between = (new_date - previous).num_days().abs();
        let (current_streak, last_logged_date, change) = if new_date == previous {
            (program.current_streak.max(1), new_date, StreakChange::SameDay)
        } else if new_date < previous {
            (program.current_streak.max(1), previous, StreakChange::Backfill)
        } else if days_between <= MAX_STREAK_GAP_DAYS {
            (program.current_streak + 1, new_date, StreakChange::Extended)
        } else {
            info!(
                program.id = %program.id,
                days_between,
                previous_streak = program.current_streak,
                "Logging gap broke the streak"
            );
            (1, new_date, StreakChange::Reset)
        };

        StreakUpdate {
            current_streak,
            longest_streak: program.longest_streak.max(current_streak),
            last_logged_date,
            days_between: Some(days_between),
            change,
        }
    }

    /// Fraction of days since the program started on which a log exists
    ///
    /// The start day counts; the denominator is never below one and the
    /// result never above one.
    #[must_use]
    pub fn adherence_rate(days_logged: u32, start_date: NaiveDate, today: NaiveDate) -> f64 {
        let total_days = ((today - start_date).num_days() + 1).max(1);
        (f64::from(days_logged) / total_days as f64).min(1.0)
    }

    /// Compare the last seven days with the seven before
    ///
    /// When the previous week has no log, its means default to this week's
    /// so the change is zero rather than a spurious trend.
    #[must_use]
    pub fn weekly_summary(logs: &[SymptomLog], today: NaiveDate) -> WeeklySummary {
        let mut this_week: Vec<&SymptomLog> = Vec::new();
        let mut previous_week: Vec<&SymptomLog> = Vec::new();

        for log in logs {
            match (today - log.date).num_days() {
                days if (0..WEEK_DAYS).contains(&days) => this_week.push(log),
                days if (WEEK_DAYS..SUMMARY_WINDOW_DAYS).contains(&days) => {
                    previous_week.push(log);
                }
                _ => {}
            }
        }

        let current = averages(&this_week);
        let previous = averages(&previous_week);
        let (current, previous) = match (current, previous) {
            (Some(c), Some(p)) => (c, p),
            (Some(c), None) => (c, WeekAverages { days_logged: 0, ..c }),
            (None, Some(p)) => (WeekAverages { days_logged: 0, ..p }, p),
            (None, None) => (WeekAverages::empty(), WeekAverages::empty()),
        };

        WeeklySummary {
            avg_pain_change: current.avg_pain - previous.avg_pain,
            avg_stiffness_change: current.avg_stiffness - previous.avg_stiffness,
            days_logged_this_week: current.days_logged,
            this_week: current,
            previous_week: previous,
        }
    }
}

impl WeekAverages {
    const fn empty() -> Self {
        Self {
            avg_pain: 0.0,
            avg_stiffness: 0.0,
            days_logged: 0,
        }
    }
}

fn averages(logs: &[&SymptomLog]) -> Option<WeekAverages> {
    if logs.is_empty() {
        return None;
    }
    let count = logs.len() as f64;
    Some(WeekAverages {
        avg_pain: logs.iter().map(|l| f64::from(l.pain)).sum::<f64>() / count,
        avg_stiffness: logs.iter().map(|l| f64::from(l.stiffness)).sum::<f64>() / count,
        days_logged: u32::try_from(logs.len()).unwrap_or(u32::MAX),
    })
}
