// ABOUTME: Plan and shortlist models produced by the plan engine
// ABOUTME: Trend, ShortlistItem, PlanKind, PlanOrigin and Plan definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::exercise::Dosage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;
use uuid::Uuid;

/// Symptom trajectory classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Pain or stiffness dropped by at least one point against baseline
    Improving,
    /// No metric moved by a full point
    Stable,
    /// Pain or stiffness rose by at least one point against baseline
    Worse,
}

impl Trend {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Worse => "worse",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exercise in a generated plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortlistItem {
    /// Catalog exercise id
    pub exercise_id: String,
    /// Catalog exercise name
    pub exercise_name: String,
    /// Bucket slug the exercise was selected from
    pub bucket_slug: String,
    /// Human-readable bucket label, e.g. "Knee Mobility"
    pub bucket_label: String,
    /// Prescribed dosage
    pub dosage: Dosage,
    /// Dosage rendered for display
    pub rendered_dosage_text: String,
}

/// How a plan's shortlist was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// First plan of a program, low dosage only
    Initial,
    /// Shortlist adjusted by the progression engine
    Progression,
    /// Previous shortlist re-issued unchanged
    CarryForward,
}

/// Record that triggered the plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum PlanOrigin {
    /// Generated after a symptom log
    Log(Uuid),
    /// Generated at onboarding
    Onboarding(Uuid),
}

/// Immutable generated plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Plan identifier
    pub id: Uuid,
    /// Program the plan belongs to
    pub program_id: Uuid,
    /// Log or onboarding profile that triggered the plan
    pub origin: PlanOrigin,
    /// How the shortlist was produced
    pub kind: PlanKind,
    /// Selected exercises
    pub shortlist: Vec<ShortlistItem>,
    /// Trend observed when the plan was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_at_generation: Option<Trend>,
    /// When this plan record was created
    pub generated_at: DateTime<Utc>,
    /// When the shortlist content was last selected or progressed
    pub shortlist_generated_at: DateTime<Utc>,
}

impl Plan {
    /// Create a plan whose shortlist was produced at `now`
    #[must_use]
    pub fn new(
        program_id: Uuid,
        origin: PlanOrigin,
        kind: PlanKind,
        shortlist: Vec<ShortlistItem>,
        trend_at_generation: Option<Trend>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id,
            origin,
            kind,
            shortlist,
            trend_at_generation,
            generated_at: now,
            shortlist_generated_at: now,
        }
    }

    /// Re-issue this plan's shortlist for a new log without resetting its age
    #[must_use]
    pub fn carry_forward(&self, log_id: Uuid, trend: Option<Trend>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: self.program_id,
            origin: PlanOrigin::Log(log_id),
            kind: PlanKind::CarryForward,
            shortlist: self.shortlist.clone(),
            trend_at_generation: trend,
            generated_at: now,
            shortlist_generated_at: self.shortlist_generated_at,
        }
    }

    /// Whether this is the first plan of its program
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.kind == PlanKind::Initial
    }

    /// Log that triggered this plan, if any
    #[must_use]
    pub const fn log_id(&self) -> Option<Uuid> {
        match self.origin {
            PlanOrigin::Log(id) => Some(id),
            PlanOrigin::Onboarding(_) => None,
        }
    }
}

/// Display label for a bucket slug
///
/// The tier word moves to the end: `mobility_knee` becomes "Knee Mobility".
#[must_use]
pub fn bucket_label(slug: &str) -> String {
    let mut words = slug.split('_').filter(|w| !w.is_empty());
    let Some(tier) = words.next() else {
        return String::new();
    };
    words
        .chain(iter::once(tier))
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
