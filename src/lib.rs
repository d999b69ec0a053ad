// ABOUTME: Main library entry point for the adaptive rehabilitation plan engine
// ABOUTME: Wires the rule crates to collaborator stores, the advice cache, config, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rehab Plan Engine
//!
//! Tracks a user's rehabilitation progress from daily symptom logs and
//! produces an evolving exercise plan.
//!
//! ## Architecture
//!
//! - **`rehab-core`**: models, errors and rule constants
//! - **`rehab-intelligence`**: the pure rule components (trend analyzer,
//!   pattern mapper, plan selector, progression trigger, adherence tracker)
//! - **this crate**: collaborator traits and in-memory stores, the advice
//!   cache and service, environment configuration, logging, and the
//!   [`PlanEngine`] that runs the pipeline per log
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, Utc};
//! use rehab_plan_engine::models::{BodySide, NewSymptomLog, Program};
//! use rehab_plan_engine::stores::catalog::default_catalog;
//! use rehab_plan_engine::stores::memory::InMemoryStore;
//! use rehab_plan_engine::stores::ProgramStore;
//! use rehab_plan_engine::errors::AppResult;
//! use rehab_plan_engine::PlanEngine;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let engine = PlanEngine::new(Arc::new(default_catalog()?), store.clone());
//!
//!     let today = Utc::now().date_naive();
//!     let program = Program::new(Uuid::new_v4(), "knee", BodySide::Left, today);
//!     let program = store.save_program(program).await?;
//!
//!     let outcome = engine
//!         .record_log(NewSymptomLog::new(program.id, today, 4, 3), Utc::now())
//!         .await?;
//!     println!("{} exercises", outcome.plan.map_or(0, |p| p.shortlist.len()));
//!     Ok(())
//! }
//! ```

/// Advice formatter contract, fallbacks and the advice service
pub mod advice;

/// Advice cache
pub mod cache;

/// Environment configuration
pub mod config;

/// Unified error types
pub mod errors;

/// Rule components
pub mod intelligence;

/// Logging configuration and subscriber setup
pub mod logging;

/// Domain models
pub mod models;

/// Plan engine service
pub mod services;

/// Collaborator store traits and in-memory implementations
pub mod stores;

pub use services::PlanEngine;
