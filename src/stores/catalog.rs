// ABOUTME: In-memory exercise catalog and the built-in seed catalog
// ABOUTME: Loads exercise definitions from JSON and serves bucket lookups in stable order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rehab_core::errors::{AppError, AppResult};
use rehab_core::models::ExerciseCatalogEntry;
use rehab_intelligence::ExerciseCatalog;
use std::collections::BTreeMap;
use tracing::debug;

const SEED_CATALOG_JSON: &str = include_str!("../../data/exercise_catalog.json");

/// Exercise catalog held in memory, grouped by bucket slug
///
/// Entries keep their insertion order inside a bucket, which is the order
/// the plan selector sees them in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    buckets: BTreeMap<String, Vec<ExerciseCatalogEntry>>,
}

impl InMemoryCatalog {
    /// Build a catalog from entries
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = ExerciseCatalogEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Parse a catalog from a JSON array of entries
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON does not describe entries
    pub fn from_json(json: &str) -> AppResult<Self> {
        let entries: Vec<ExerciseCatalogEntry> = serde_json::from_str(json)?;
        if let Some(entry) = entries.iter().find(|e| e.bucket_slug.trim().is_empty()) {
            return Err(AppError::invalid_input(format!(
                "exercise {} has no bucket",
                entry.id
            )));
        }
        Ok(Self::new(entries))
    }

    /// Add an entry, replacing any entry with the same id in its bucket
    pub fn insert(&mut self, entry: ExerciseCatalogEntry) {
        let bucket = self.buckets.entry(entry.bucket_slug.clone()).or_default();
        if let Some(existing) = bucket.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        } else {
            bucket.push(entry);
        }
    }

    /// Bucket slugs with at least one active entry
    #[must_use]
    pub fn active_buckets(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .filter(|(_, entries)| entries.iter().any(|e| e.active))
            .map(|(slug, _)| slug.as_str())
            .collect()
    }

    /// Total number of entries, inactive included
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl ExerciseCatalog for InMemoryCatalog {
    fn find_exercises(
        &self,
        bucket_slug: &str,
        exclude_ids: &[String],
    ) -> Vec<ExerciseCatalogEntry> {
        let found: Vec<ExerciseCatalogEntry> = self
            .buckets
            .get(bucket_slug)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.active && !exclude_ids.contains(&e.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        debug!(bucket = bucket_slug, found = found.len(), "Catalog lookup");
        found
    }
}

/// The built-in seed catalog covering every bucket the pattern rules target
///
/// # Errors
///
/// Returns a serialization error if the bundled catalog is malformed
pub fn default_catalog() -> AppResult<InMemoryCatalog> {
    InMemoryCatalog::from_json(SEED_CATALOG_JSON)
}
