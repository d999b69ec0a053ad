// ABOUTME: Persistence collaborator interfaces consumed by the plan engine
// ABOUTME: LogStore, PlanStore and ProgramStore traits plus in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stores
//!
//! The engine treats storage as a keyed record store. Every operation is
//! scoped to one program id; implementations need no cross-program
//! ordering guarantees. Store failures are returned to the caller as-is and
//! are never retried by the engine.

/// In-memory exercise catalog with the built-in seed
pub mod catalog;
/// In-memory log, plan and program stores
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rehab_core::errors::AppResult;
use rehab_core::models::{Plan, Program, SymptomLog};
use uuid::Uuid;

/// Symptom log persistence
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Up to `limit` logs of a program, most-recent-first by date
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn recent_logs(&self, program_id: Uuid, limit: usize) -> AppResult<Vec<SymptomLog>>;

    /// Number of logs created strictly after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn logs_since(&self, program_id: Uuid, since: DateTime<Utc>) -> AppResult<u32>;

    /// The log recorded for one calendar day, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn find_log_by_date(
        &self,
        program_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<SymptomLog>>;

    /// Insert a log, or replace the stored log with the same id
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn save_log(&self, log: SymptomLog) -> AppResult<SymptomLog>;

    /// Number of distinct logged days of a program
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn count_logged_days(&self, program_id: Uuid) -> AppResult<u32>;
}

/// Plan persistence
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Most recently generated plan of a program
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn latest_plan(&self, program_id: Uuid) -> AppResult<Option<Plan>>;

    /// Store a new plan
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn save_plan(&self, plan: Plan) -> AppResult<Plan>;
}

/// Program persistence
#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// Load a program
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for unknown ids, or a store error
    async fn get_program(&self, program_id: Uuid) -> AppResult<Program>;

    /// Insert or replace a program
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails
    async fn save_program(&self, program: Program) -> AppResult<Program>;

    /// Persist streak fields after a new log
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for unknown ids, or a store error
    async fn update_streak_fields(
        &self,
        program_id: Uuid,
        current_streak: u32,
        longest_streak: u32,
        last_logged_date: NaiveDate,
    ) -> AppResult<()>;
}
