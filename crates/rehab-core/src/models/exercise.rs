// ABOUTME: Exercise catalog entry and dosage models
// ABOUTME: ExerciseCatalogEntry, DosagePresets, DosageLevel and Dosage definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Discrete dosage tier offered by a catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DosageLevel {
    /// Conservative starting dose
    Low,
    /// Baseline dose once the user tolerates the exercise
    Moderate,
    /// Advanced dose, not offered by every exercise
    High,
}

impl DosageLevel {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Prescribed volume for one exercise
///
/// Exactly one of `reps`, `hold_seconds` or `time_seconds` is the primary
/// measure for a given exercise; the others stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Dosage {
    /// Number of sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions per set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Isometric hold per set in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_seconds: Option<u32>,
    /// Continuous work per set in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<u32>,
    /// Rest between sets in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    /// Free-text cue appended to the rendered dosage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Dosage {
    /// Sets x reps dosage
    #[must_use]
    pub const fn sets_reps(sets: u32, reps: u32) -> Self {
        Self {
            sets: Some(sets),
            reps: Some(reps),
            hold_seconds: None,
            time_seconds: None,
            rest_seconds: None,
            notes: None,
        }
    }

    /// Sets x hold dosage
    #[must_use]
    pub const fn sets_hold(sets: u32, hold_seconds: u32) -> Self {
        Self {
            sets: Some(sets),
            reps: None,
            hold_seconds: Some(hold_seconds),
            time_seconds: None,
            rest_seconds: None,
            notes: None,
        }
    }

    /// Continuous time dosage without sets
    #[must_use]
    pub const fn timed(time_seconds: u32) -> Self {
        Self {
            sets: None,
            reps: None,
            hold_seconds: None,
            time_seconds: Some(time_seconds),
            rest_seconds: None,
            notes: None,
        }
    }

    /// Set number of sets
    #[must_use]
    pub const fn with_sets(mut self, sets: u32) -> Self {
        self.sets = Some(sets);
        self
    }

    /// Set rest between sets
    #[must_use]
    pub const fn with_rest(mut self, rest_seconds: u32) -> Self {
        self.rest_seconds = Some(rest_seconds);
        self
    }

    /// Set free-text cue
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Dosage presets keyed by level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DosagePresets {
    /// Low preset, always present
    pub low: Dosage,
    /// Moderate preset, always present
    pub moderate: Dosage,
    /// Optional high preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Dosage>,
}

impl DosagePresets {
    /// Preset for a level, falling back one tier when `high` is absent
    #[must_use]
    pub fn for_level(&self, level: DosageLevel) -> &Dosage {
        match level {
            DosageLevel::Low => &self.low,
            DosageLevel::Moderate => &self.moderate,
            DosageLevel::High => self.high.as_ref().unwrap_or(&self.moderate),
        }
    }
}

/// Read-only catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseCatalogEntry {
    /// Stable exercise identifier
    pub id: String,
    /// Bucket the exercise belongs to, e.g. `mobility_knee`
    pub bucket_slug: String,
    /// Display name
    pub name: String,
    /// Dosage presets
    pub presets: DosagePresets,
    /// Safety notes shown alongside the exercise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_notes: Option<String>,
    /// Inactive entries are never returned by catalog lookups
    pub active: bool,
}
