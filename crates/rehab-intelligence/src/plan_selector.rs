// ABOUTME: Exercise shortlist selection for initial plans and trend-driven progression
// ABOUTME: Picks 2-3 catalog exercises per generation and moves bucket tiers with the trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan Selection and Progression
//!
//! Two entry points share one catalog-filling routine:
//!
//! - [`PlanSelector::select_initial`] takes mapped buckets and picks one
//!   exercise per bucket at the low preset.
//! - [`PlanSelector::progress`] takes the current shortlist and a trend,
//!   moves each non-mobility bucket one tier (`activation`/`isometric` →
//!   `strength` → `stability` when improving, back to `activation` when
//!   worse), then refills the shortlist at the moderate preset and adjusts
//!   dosage for strength and isometric work.
//!
//! Buckets are read from the slug stored on every shortlist item, never
//! inferred back from display labels.

use crate::catalog::ExerciseCatalog;
use crate::config::ProgressionConfig;
use crate::dosage::{adjust_dosage, render_dosage_text};
use rehab_core::constants::buckets::{ACTIVATION, ISOMETRIC, MOBILITY, STABILITY, STRENGTH};
use rehab_core::constants::progression::MIN_SHORTLIST_LEN;
use rehab_core::errors::{AppError, AppResult};
use rehab_core::models::{bucket_label, DosageLevel, ExerciseCatalogEntry, ShortlistItem, Trend};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of one progression step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressionOutcome {
    /// Buckets of the previous shortlist
    pub previous_buckets: Vec<String>,
    /// Buckets after the tier transform
    pub buckets: Vec<String>,
    /// New shortlist
    pub shortlist: Vec<ShortlistItem>,
}

/// Shortlist selector backed by an exercise catalog
pub struct PlanSelector<'a> {
    catalog: &'a dyn ExerciseCatalog,
    config: ProgressionConfig,
}

impl<'a> PlanSelector<'a> {
    /// Create a selector with default progression settings
    #[must_use]
    pub fn new(catalog: &'a dyn ExerciseCatalog) -> Self {
        Self {
            catalog,
            config: ProgressionConfig::default(),
        }
    }

    /// Create a selector with custom progression settings
    #[must_use]
    pub const fn with_config(catalog: &'a dyn ExerciseCatalog, config: ProgressionConfig) -> Self {
        Self { catalog, config }
    }

    /// Select the first shortlist of a program
    ///
    /// One exercise per bucket, in bucket order, up to the selection cap.
    /// When fewer than two were found, a second pass draws further
    /// exercises from the same buckets. Every dosage is the low preset.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPlan` when no bucket yields any active exercise
    pub fn select_initial(&self, buckets: &[String]) -> AppResult<Vec<ShortlistItem>> {
        let mut selected: Vec<ShortlistItem> = Vec::with_capacity(self.config.max_exercises);
        self.fill(&mut selected, buckets, DosageLevel::Low);

        if selected.is_empty() {
            warn!(buckets = ?buckets, "Initial selection found no active exercise");
            return Err(AppError::empty_plan(buckets));
        }
        if selected.len() < MIN_SHORTLIST_LEN {
            warn!(
                buckets = ?buckets,
                selected = selected.len(),
                "Initial selection is below the minimum shortlist size"
            );
        }
        Ok(selected)
    }

    /// Progress an existing shortlist by one generation
    ///
    /// # Errors
    ///
    /// Returns `EmptyPlan` when neither the transformed nor the previous
    /// buckets yield any exercise and no exercise was kept for continuity.
    /// On a worse trend, strength and stability buckets are not used for the
    /// top-up.
    pub fn progress(
        &self,
        current: &[ShortlistItem],
        trend: Trend,
    ) -> AppResult<ProgressionOutcome> {
        let previous_buckets = distinct_buckets(current);
        let buckets = transform_buckets(&previous_buckets, trend);
        debug!(
            trend = %trend,
            from = ?previous_buckets,
            to = ?buckets,
            "Transformed plan buckets"
        );

        let mut selected: Vec<ShortlistItem> = Vec::with_capacity(self.config.max_exercises);
        if trend != Trend::Worse {
            if let Some(first) = current.first() {
                selected.push(first.clone());
            }
        }

        self.fill(&mut selected, &buckets, DosageLevel::Moderate);
        if selected.len() < MIN_SHORTLIST_LEN {
            let top_up = top_up_buckets(&previous_buckets, trend);
            self.fill(&mut selected, &top_up, DosageLevel::Moderate);
        }
        if selected.is_empty() {
            warn!(buckets = ?buckets, "Progression found no active exercise");
            return Err(AppError::empty_plan(&buckets));
        }

        let shortlist = selected
            .into_iter()
            .map(|item| {
                let dosage = adjust_dosage(&item.dosage, &item.bucket_slug, trend);
                ShortlistItem {
                    rendered_dosage_text: render_dosage_text(&dosage),
                    dosage,
                    ..item
                }
            })
            .collect();

        Ok(ProgressionOutcome {
            previous_buckets,
            buckets,
            shortlist,
        })
    }

    /// Fill `selected` up to the cap from `buckets`
    ///
    /// First pass takes at most one exercise per bucket. If the shortlist is
    /// still below the minimum, a second pass takes any remaining exercise
    /// from the same buckets. Exercise ids are never repeated.
    fn fill(&self, selected: &mut Vec<ShortlistItem>, buckets: &[String], level: DosageLevel) {
        let cap = self.config.max_exercises;

        for bucket in buckets {
            if selected.len() >= cap {
                return;
            }
            if let Some(entry) = self.catalog.find_exercises(bucket, &ids(selected)).first() {
                selected.push(shortlist_item(entry, bucket, level));
            }
        }

        if selected.len() >= MIN_SHORTLIST_LEN {
            return;
        }
        for bucket in buckets {
            for entry in self.catalog.find_exercises(bucket, &ids(selected)) {
                if selected.len() >= cap {
                    return;
                }
                selected.push(shortlist_item(&entry, bucket, level));
            }
        }
    }
}

/// Move every non-mobility bucket one tier for the trend
///
/// Mobility buckets come first and are kept verbatim. The result is
/// deduplicated in first-seen order.
#[must_use]
pub fn transform_buckets(buckets: &[String], trend: Trend) -> Vec<String> {
    let (mobility, others): (Vec<&String>, Vec<&String>) =
        buckets.iter().partition(|b| tier_of(b) == MOBILITY);

    let mut result: Vec<String> = Vec::with_capacity(buckets.len());
    let transformed = others.into_iter().map(|b| transform_bucket(b, trend));
    for bucket in mobility.into_iter().cloned().chain(transformed) {
        if !result.contains(&bucket) {
            result.push(bucket);
        }
    }
    result
}

/// Move one bucket slug one tier for the trend
#[must_use]
pub fn transform_bucket(bucket: &str, trend: Trend) -> String {
    let tier = tier_of(bucket);
    let target = match trend {
        Trend::Improving => match tier {
            ACTIVATION | ISOMETRIC => STRENGTH,
            STRENGTH => STABILITY,
            _ => return bucket.to_owned(),
        },
        Trend::Worse => match tier {
            STRENGTH | STABILITY => ACTIVATION,
            _ => return bucket.to_owned(),
        },
        Trend::Stable => return bucket.to_owned(),
    };
    match bucket.split_once('_') {
        Some((_, area)) => format!("{target}_{area}"),
        None => target.to_owned(),
    }
}

/// Tier word of a bucket slug, e.g. `activation` for `activation_quads`
fn tier_of(bucket: &str) -> &str {
    bucket.split_once('_').map_or(bucket, |(tier, _)| tier)
}

/// Previous buckets allowed to top up a short progression
///
/// A worse trend never draws from strength or stability buckets again.
fn top_up_buckets(previous: &[String], trend: Trend) -> Vec<String> {
    previous
        .iter()
        .filter(|b| trend != Trend::Worse || !matches!(tier_of(b), STRENGTH | STABILITY))
        .cloned()
        .collect()
}

fn distinct_buckets(shortlist: &[ShortlistItem]) -> Vec<String> {
    let mut buckets: Vec<String> = Vec::with_capacity(shortlist.len());
    for item in shortlist {
        if !buckets.contains(&item.bucket_slug) {
            buckets.push(item.bucket_slug.clone());
        }
    }
    buckets
}

fn ids(selected: &[ShortlistItem]) -> Vec<String> {
    selected.iter().map(|s| s.exercise_id.clone()).collect()
}

fn shortlist_item(entry: &ExerciseCatalogEntry, bucket: &str, level: DosageLevel) -> ShortlistItem {
    let dosage = entry.presets.for_level(level).clone();
    ShortlistItem {
        exercise_id: entry.id.clone(),
        exercise_name: entry.name.clone(),
        bucket_slug: bucket.to_owned(),
        bucket_label: bucket_label(bucket),
        rendered_dosage_text: render_dosage_text(&dosage),
        dosage,
    }
}
