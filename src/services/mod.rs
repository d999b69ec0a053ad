// ABOUTME: Service layer running the rehabilitation rule pipeline against injected collaborators
// ABOUTME: Hosts the plan engine used by any transport or embedding application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services are transport-agnostic: they take collaborator traits, never
//! concrete databases or HTTP types.

/// Plan generation, log recording, progression and adherence queries
pub mod plan_engine;

pub use plan_engine::{AdherenceReport, InitialPlanOutcome, LogOutcome, PlanEngine};
