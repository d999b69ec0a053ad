// ABOUTME: Core data models for the rehabilitation plan engine
// ABOUTME: Re-exports SymptomLog, Program, ExerciseCatalogEntry, Dosage and Plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records exchanged between the rule components and the persistence
//! collaborators. Logs and plans are immutable once stored, apart from the
//! same-day correction of a log.
//!
//! ## Core Models
//!
//! - `SymptomLog`: one day of pain/stiffness scores for a program
//! - `Program`: a rehabilitation program with its streak fields
//! - `ExerciseCatalogEntry`: read-only exercise with dosage presets
//! - `Plan`: a generated shortlist of up to three exercises

mod exercise;
mod plan;
mod program;
mod symptom_log;

// Catalog domain
pub use exercise::{Dosage, DosageLevel, DosagePresets, ExerciseCatalogEntry};

// Plan domain
pub use plan::{bucket_label, Plan, PlanKind, PlanOrigin, ShortlistItem, Trend};

// Program domain
pub use program::{BodySide, Program, ProgramStatus};

// Symptom domain
pub use symptom_log::{ActivityLevel, NewSymptomLog, SymptomLog};
