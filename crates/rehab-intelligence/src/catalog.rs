// ABOUTME: Read-only exercise catalog lookup consumed by the plan selector
// ABOUTME: Defines the ExerciseCatalog trait implemented by catalog stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rehab_core::models::ExerciseCatalogEntry;

/// Catalog lookup by bucket
///
/// Implementations must only return active entries and must preserve a
/// stable order so that selection stays reproducible.
pub trait ExerciseCatalog: Send + Sync {
    /// Active exercises in `bucket_slug` whose id is not in `exclude_ids`
    ///
    /// An empty result is valid.
    fn find_exercises(&self, bucket_slug: &str, exclude_ids: &[String])
        -> Vec<ExerciseCatalogEntry>;
}
