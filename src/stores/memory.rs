// ABOUTME: In-memory implementations of the log, plan and program stores
// ABOUTME: DashMap-backed, keyed by program id, suitable for tests and embedding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{LogStore, PlanStore, ProgramStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rehab_core::errors::{AppError, AppResult};
use rehab_core::models::{Plan, Program, SymptomLog};
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory record store for logs, plans and programs
///
/// `DashMap` shards by program id, so concurrent requests for different
/// programs never contend on the same lock.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    logs: Arc<DashMap<Uuid, Vec<SymptomLog>>>,
    plans: Arc<DashMap<Uuid, Vec<Plan>>>,
    programs: Arc<DashMap<Uuid, Program>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every plan of a program in generation order
    #[must_use]
    pub fn plans_for(&self, program_id: Uuid) -> Vec<Plan> {
        self.plans
            .get(&program_id)
            .map(|plans| plans.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LogStore for InMemoryStore {
    async fn recent_logs(&self, program_id: Uuid, limit: usize) -> AppResult<Vec<SymptomLog>> {
        let mut logs = self
            .logs
            .get(&program_id)
            .map(|logs| logs.clone())
            .unwrap_or_default();
        logs.sort_by_key(|log| Reverse(log.date));
        logs.truncate(limit);
        Ok(logs)
    }

    async fn logs_since(&self, program_id: Uuid, since: DateTime<Utc>) -> AppResult<u32> {
        let count = self.logs.get(&program_id).map_or(0, |logs| {
            logs.iter().filter(|log| log.created_at > since).count()
        });
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn find_log_by_date(
        &self,
        program_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<SymptomLog>> {
        Ok(self
            .logs
            .get(&program_id)
            .and_then(|logs| logs.iter().find(|log| log.date == date).cloned()))
    }

    async fn save_log(&self, log: SymptomLog) -> AppResult<SymptomLog> {
        let mut logs = self.logs.entry(log.program_id).or_default();
        if let Some(existing) = logs.iter_mut().find(|l| l.id == log.id) {
            existing.clone_from(&log);
        } else if logs.iter().any(|l| l.date == log.date) {
            return Err(AppError::invalid_input(format!(
                "a log for {} already exists",
                log.date
            ))
            .with_program_id(log.program_id));
        } else {
            logs.push(log.clone());
        }
        drop(logs);
        Ok(log)
    }

    async fn count_logged_days(&self, program_id: Uuid) -> AppResult<u32> {
        let count = self.logs.get(&program_id).map_or(0, |logs| logs.len());
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl PlanStore for InMemoryStore {
    async fn latest_plan(&self, program_id: Uuid) -> AppResult<Option<Plan>> {
        Ok(self
            .plans
            .get(&program_id)
            .and_then(|plans| plans.last().cloned()))
    }

    async fn save_plan(&self, plan: Plan) -> AppResult<Plan> {
        self.plans
            .entry(plan.program_id)
            .or_default()
            .push(plan.clone());
        Ok(plan)
    }
}

#[async_trait]
impl ProgramStore for InMemoryStore {
    async fn get_program(&self, program_id: Uuid) -> AppResult<Program> {
        self.programs
            .get(&program_id)
            .map(|program| program.clone())
            .ok_or_else(|| AppError::not_found(format!("Program {program_id}")))
    }

    async fn save_program(&self, program: Program) -> AppResult<Program> {
        self.programs.insert(program.id, program.clone());
        Ok(program)
    }

    async fn update_streak_fields(
        &self,
        program_id: Uuid,
        current_streak: u32,
        longest_streak: u32,
        last_logged_date: NaiveDate,
    ) -> AppResult<()> {
        let mut program = self
            .programs
            .get_mut(&program_id)
            .ok_or_else(|| AppError::not_found(format!("Program {program_id}")))?;
        program.current_streak = current_streak;
        program.longest_streak = longest_streak;
        program.last_logged_date = Some(last_logged_date);
        drop(program);
        Ok(())
    }
}
