// ABOUTME: Daily symptom log model with validation and same-day correction
// ABOUTME: SymptomLog, NewSymptomLog and ActivityLevel definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::symptom_scores::{MAX_SCORE, MIN_SCORE};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Self-reported activity level for the logged day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Mostly resting
    Rest,
    /// Light daily activity
    Light,
    /// Normal activity
    Moderate,
    /// Sport or heavy physical work
    High,
}

impl ActivityLevel {
    /// Parse activity level from string, `None` for unknown values
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rest" | "resting" => Some(Self::Rest),
            "light" | "low" => Some(Self::Light),
            "moderate" | "normal" => Some(Self::Moderate),
            "high" | "active" | "heavy" => Some(Self::High),
            _ => None,
        }
    }
}

/// Symptom values submitted for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSymptomLog {
    /// Program the log belongs to
    pub program_id: Uuid,
    /// Calendar day being logged
    pub date: NaiveDate,
    /// Pain score 0-10
    pub pain: u8,
    /// Stiffness score 0-10
    pub stiffness: u8,
    /// Optional swelling score 0-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swelling: Option<u8>,
    /// Optional activity level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// Activities that made symptoms worse
    #[serde(default)]
    pub aggravators: BTreeSet<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

impl NewSymptomLog {
    /// Create a log input with the two mandatory scores
    #[must_use]
    pub fn new(program_id: Uuid, date: NaiveDate, pain: u8, stiffness: u8) -> Self {
        Self {
            program_id,
            date,
            pain,
            stiffness,
            swelling: None,
            activity_level: None,
            aggravators: BTreeSet::new(),
            notes: String::new(),
        }
    }

    /// Set swelling score
    #[must_use]
    pub const fn with_swelling(mut self, swelling: u8) -> Self {
        self.swelling = Some(swelling);
        self
    }

    /// Set activity level
    #[must_use]
    pub const fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    /// Add an aggravating activity
    #[must_use]
    pub fn with_aggravator(mut self, aggravator: impl Into<String>) -> Self {
        self.aggravators.insert(aggravator.into());
        self
    }

    /// Set free-text notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check every score is within 0-10
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_score("pain", self.pain)?;
        check_score("stiffness", self.stiffness)?;
        if let Some(swelling) = self.swelling {
            check_score("swelling", swelling)?;
        }
        Ok(())
    }
}

fn check_score(field: &str, value: u8) -> AppResult<()> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(AppError::value_out_of_range(
            field, value, MIN_SCORE, MAX_SCORE,
        ))
    }
}

/// Stored symptom log, unique per program and calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomLog {
    /// Log identifier
    pub id: Uuid,
    /// Program the log belongs to
    pub program_id: Uuid,
    /// Calendar day being logged
    pub date: NaiveDate,
    /// Pain score 0-10
    pub pain: u8,
    /// Stiffness score 0-10
    pub stiffness: u8,
    /// Optional swelling score 0-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swelling: Option<u8>,
    /// Optional activity level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// Activities that made symptoms worse
    pub aggravators: BTreeSet<String>,
    /// Free-text notes
    pub notes: String,
    /// When the log was first recorded
    pub created_at: DateTime<Utc>,
    /// When the log was last corrected
    pub updated_at: DateTime<Utc>,
}

impl SymptomLog {
    /// Build a stored log from validated input
    #[must_use]
    pub fn from_new(input: NewSymptomLog, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: input.program_id,
            date: input.date,
            pain: input.pain,
            stiffness: input.stiffness,
            swelling: input.swelling,
            activity_level: input.activity_level,
            aggravators: input.aggravators,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the logged values with a same-day correction
    ///
    /// Identity, program, date and creation time are preserved.
    pub fn apply_correction(&mut self, input: NewSymptomLog, now: DateTime<Utc>) {
        self.pain = input.pain;
        self.stiffness = input.stiffness;
        self.swelling = input.swelling;
        self.activity_level = input.activity_level;
        self.aggravators = input.aggravators;
        self.notes = input.notes;
        self.updated_at = now;
    }
}
