// ABOUTME: Domain models re-exported from the core crate
// ABOUTME: Programs, symptom logs, catalog entries, dosage, plans and shortlists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rehab_core::models::{
    bucket_label, ActivityLevel, BodySide, Dosage, DosageLevel, DosagePresets,
    ExerciseCatalogEntry, NewSymptomLog, Plan, PlanKind, PlanOrigin, Program, ProgramStatus,
    ShortlistItem, SymptomLog, Trend,
};
