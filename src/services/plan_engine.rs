// ABOUTME: Plan engine service orchestrating the rule pipeline for each new symptom log
// ABOUTME: Validates logs, updates streaks, classifies trend, progresses or carries plans, gates advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Engine
//!
//! One call to [`PlanEngine::record_log`] runs the whole pipeline:
//!
//! 1. validate the log and require an active program
//! 2. a log for an already-logged day is a correction: stored, nothing else
//! 3. otherwise save the log and update the program's streak fields
//! 4. classify the trend over the most recent logs
//! 5. produce exactly one plan: initial when the program has none,
//!    progression when the trigger fires, carry-forward otherwise
//! 6. attach advice through the advice service, when one is configured
//!
//! Every read the decision depends on happens before the decision. Store
//! errors are returned unchanged.

use crate::advice::{AdviceContext, AdviceFormatter, AdviceOutcome, AdviceService};
use crate::config::EngineConfig;
use crate::stores::{LogStore, PlanStore, ProgramStore};
use chrono::{DateTime, NaiveDate, Utc};
use rehab_core::constants::adherence::MAX_STREAK_GAP_DAYS;
use rehab_core::errors::{AppError, AppResult, ErrorCode};
use rehab_core::models::{
    NewSymptomLog, Plan, PlanKind, PlanOrigin, Program, ProgramStatus, ShortlistItem, SymptomLog,
    Trend,
};
use rehab_intelligence::{
    check_progression, AdherenceTracker, ConfidenceLevel, ExerciseCatalog, IntelligenceConfig,
    PatternInference, PatternMapper, PatternMapping, PlanSelector, ProgressionCheck,
    StreakUpdate, TrendAnalysis, TrendAnalyzer, WeeklySummary,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Result of onboarding plan generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialPlanOutcome {
    /// Stored initial plan
    pub plan: Plan,
    /// Buckets the pattern mapper chose
    pub mapping: PatternMapping,
    /// Advice, when an advice service is configured
    pub advice: Option<AdviceOutcome>,
}

/// Result of recording one symptom log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogOutcome {
    /// Stored log
    pub log: SymptomLog,
    /// Whether the log replaced an existing log for the same day
    pub corrected: bool,
    /// Streak movement; absent for corrections
    pub streak: Option<StreakUpdate>,
    /// Trend over the recent window; absent for corrections
    pub trend: Option<TrendAnalysis>,
    /// Progression check against the previous plan, when one existed
    pub progression: Option<ProgressionCheck>,
    /// Plan generated for the log; absent for corrections
    pub plan: Option<Plan>,
    /// Advice for the plan, when an advice service is configured
    pub advice: Option<AdviceOutcome>,
}

/// Adherence figures for one program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdherenceReport {
    /// Program the report describes
    pub program_id: Uuid,
    /// Stored current streak
    pub current_streak: u32,
    /// Longest streak ever reached
    pub longest_streak: u32,
    /// Whether a log today would still extend the current streak
    pub streak_active: bool,
    /// Most recent logged day
    pub last_logged_date: Option<NaiveDate>,
    /// Distinct logged days
    pub days_logged: u32,
    /// Logged days over days since the program started
    pub adherence_rate: f64,
    /// Two-week comparison of symptom scores
    pub weekly: WeeklySummary,
}

/// Adaptive plan engine over injected collaborators
#[derive(Clone)]
pub struct PlanEngine {
    catalog: Arc<dyn ExerciseCatalog>,
    logs: Arc<dyn LogStore>,
    plans: Arc<dyn PlanStore>,
    programs: Arc<dyn ProgramStore>,
    advice: Option<AdviceService>,
    config: IntelligenceConfig,
    mapper: PatternMapper,
}

impl PlanEngine {
    /// Create an engine over one store implementing every persistence trait
    #[must_use]
    pub fn new<S>(catalog: Arc<dyn ExerciseCatalog>, store: Arc<S>) -> Self
    where
        S: LogStore + PlanStore + ProgramStore + 'static,
    {
        Self::with_stores(catalog, store.clone(), store.clone(), store)
    }

    /// Create an engine with the rule thresholds of `config`
    ///
    /// When a formatter is given, advice is attached through a service built
    /// from the configured cache settings and formatter deadline.
    #[must_use]
    pub fn from_config<S>(
        catalog: Arc<dyn ExerciseCatalog>,
        store: Arc<S>,
        config: &EngineConfig,
        formatter: Option<Arc<dyn AdviceFormatter>>,
    ) -> Self
    where
        S: LogStore + PlanStore + ProgramStore + 'static,
    {
        let engine = Self::new(catalog, store).with_config(config.intelligence.clone());
        let Some(formatter) = formatter else {
            return engine;
        };
        engine.with_advice(AdviceService::from_config(formatter, config))
    }

    /// Create an engine over separate stores
    #[must_use]
    pub fn with_stores(
        catalog: Arc<dyn ExerciseCatalog>,
        logs: Arc<dyn LogStore>,
        plans: Arc<dyn PlanStore>,
        programs: Arc<dyn ProgramStore>,
    ) -> Self {
        Self {
            catalog,
            logs,
            plans,
            programs,
            advice: None,
            config: IntelligenceConfig::default(),
            mapper: PatternMapper::new(),
        }
    }

    /// Attach an advice service
    #[must_use]
    pub fn with_advice(mut self, advice: AdviceService) -> Self {
        self.advice = Some(advice);
        self
    }

    /// Override rule thresholds
    #[must_use]
    pub fn with_config(mut self, config: IntelligenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the pattern rule table
    #[must_use]
    pub fn with_pattern_mapper(mut self, mapper: PatternMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Rule thresholds in use
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Generate the onboarding plan of a program from an upstream inference
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` when the program is not active or
    /// already has a plan, `ResourceNotFound` for an unknown program,
    /// `EmptyPlan` when the mapped buckets yield no exercise, or a store error
    #[instrument(skip_all, fields(program.id = %program_id))]
    pub async fn generate_initial_plan(
        &self,
        program_id: Uuid,
        onboarding_profile_id: Uuid,
        inference: &PatternInference,
        now: DateTime<Utc>,
    ) -> AppResult<InitialPlanOutcome> {
        let program = self.programs.get_program(program_id).await?;
        ensure_active(&program, "generate an onboarding plan for")?;
        if let Some(existing) = self.plans.latest_plan(program_id).await? {
            return Err(AppError::new(
                ErrorCode::InvalidStateTransition,
                format!("Program already has plan {}", existing.id),
            )
            .with_program_id(program_id));
        }
        let mapping = self.mapper.map(inference);
        let shortlist = self
            .selector()
            .select_initial(&mapping.buckets)
            .map_err(|e| e.with_program_id(program_id))?;

        let plan = self
            .plans
            .save_plan(Plan::new(
                program_id,
                PlanOrigin::Onboarding(onboarding_profile_id),
                PlanKind::Initial,
                shortlist,
                None,
                now,
            ))
            .await?;
        info!(
            plan.id = %plan.id,
            buckets = ?mapping.buckets,
            exercises = plan.shortlist.len(),
            "Generated onboarding plan"
        );

        let advice = self
            .advise(&program, &plan.shortlist, None, PlanKind::Initial, Vec::new(), now)
            .await;
        Ok(InitialPlanOutcome {
            plan,
            mapping,
            advice,
        })
    }

    /// Record a symptom log and generate its plan
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range scores,
    /// `InvalidStateTransition` when the program is not active,
    /// `ResourceNotFound` for an unknown program, `EmptyPlan` when no
    /// exercise can be selected, or a store error
    #[instrument(skip_all, fields(program.id = %input.program_id, log.date = %input.date))]
    pub async fn record_log(
        &self,
        input: NewSymptomLog,
        now: DateTime<Utc>,
    ) -> AppResult<LogOutcome> {
        input.validate()?;
        let program = self.programs.get_program(input.program_id).await?;
        ensure_active(&program, "record a log for")?;

        if let Some(mut existing) = self.logs.find_log_by_date(program.id, input.date).await? {
            existing.apply_correction(input, now);
            let log = self.logs.save_log(existing).await?;
            info!(log.id = %log.id, "Corrected same-day log");
            return Ok(LogOutcome {
                log,
                corrected: true,
                streak: None,
                trend: None,
                progression: None,
                plan: None,
                advice: None,
            });
        }

        let previous_latest = self
            .logs
            .recent_logs(program.id, 1)
            .await?
            .first()
            .map(|log| log.date);
        let log = self.logs.save_log(SymptomLog::from_new(input, now)).await?;

        let streak = AdherenceTracker::update_streak(&program, previous_latest, log.date);
        self.programs
            .update_streak_fields(
                program.id,
                streak.current_streak,
                streak.longest_streak,
                streak.last_logged_date,
            )
            .await?;

        let window = self
            .logs
            .recent_logs(program.id, self.config.trend.window_size)
            .await?;
        let trend = TrendAnalyzer::with_config(self.config.trend.clone()).analyze(&window);
        let trend_value = trend.as_ref().map(|t| t.trend);

        let (plan, progression) = self.next_plan(&program, &log, trend_value, now).await?;
        let plan = self.plans.save_plan(plan).await?;
        debug!(
            plan.id = %plan.id,
            plan.kind = ?plan.kind,
            trend = ?trend_value,
            streak = streak.current_streak,
            "Generated plan for log"
        );

        let log_ids = window.iter().map(|l| l.id).collect();
        let advice = self
            .advise(&program, &plan.shortlist, trend_value, plan.kind, log_ids, now)
            .await;

        Ok(LogOutcome {
            log,
            corrected: false,
            streak: Some(streak),
            trend,
            progression,
            plan: Some(plan),
            advice,
        })
    }

    /// Whether a program's shortlist is due for progression
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn should_progress(
        &self,
        program_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<ProgressionCheck> {
        let latest = self.plans.latest_plan(program_id).await?;
        self.progression_check(program_id, latest.as_ref(), now).await
    }

    /// Streak, adherence rate and weekly summary of a program
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown program, or a store error
    pub async fn adherence_report(
        &self,
        program_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<AdherenceReport> {
        let program = self.programs.get_program(program_id).await?;
        let days_logged = self.logs.count_logged_days(program_id).await?;
        let limit = usize::try_from(days_logged)
            .map_err(|e| AppError::internal(format!("Logged day count overflow: {e}")))?;
        let logs = self.logs.recent_logs(program_id, limit).await?;

        let streak_active = program
            .last_logged_date
            .is_some_and(|last| (today - last).num_days() <= MAX_STREAK_GAP_DAYS);

        Ok(AdherenceReport {
            program_id,
            current_streak: program.current_streak,
            longest_streak: program.longest_streak,
            streak_active,
            last_logged_date: program.last_logged_date,
            days_logged,
            adherence_rate: AdherenceTracker::adherence_rate(
                days_logged,
                program.start_date,
                today,
            ),
            weekly: AdherenceTracker::weekly_summary(&logs, today),
        })
    }

    /// Move a program to a new status
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` for no-op or disallowed transitions,
    /// `ResourceNotFound` for an unknown program, or a store error
    pub async fn set_program_status(
        &self,
        program_id: Uuid,
        status: ProgramStatus,
    ) -> AppResult<Program> {
        let mut program = self.programs.get_program(program_id).await?;
        let previous = program.status;
        program.transition_to(status)?;
        let program = self.programs.save_program(program).await?;
        info!(program.id = %program_id, from = %previous, to = %status, "Program status changed");
        Ok(program)
    }

    /// Plan for a newly created log, plus the progression check when a prior plan existed
    async fn next_plan(
        &self,
        program: &Program,
        log: &SymptomLog,
        trend: Option<Trend>,
        now: DateTime<Utc>,
    ) -> AppResult<(Plan, Option<ProgressionCheck>)> {
        let Some(previous) = self.plans.latest_plan(program.id).await? else {
            let shortlist = self.area_shortlist(program)?;
            let plan = Plan::new(
                program.id,
                PlanOrigin::Log(log.id),
                PlanKind::Initial,
                shortlist,
                trend,
                now,
            );
            return Ok((plan, None));
        };

        let check = self
            .progression_check(program.id, Some(&previous), now)
            .await?;
        if !check.should_progress {
            return Ok((previous.carry_forward(log.id, trend, now), Some(check)));
        }

        let trend = trend.unwrap_or(Trend::Stable);
        let outcome = self
            .selector()
            .progress(&previous.shortlist, trend)
            .map_err(|e| e.with_program_id(program.id))?;
        info!(
            program.id = %program.id,
            reason = ?check.reason,
            trend = %trend,
            from = ?outcome.previous_buckets,
            to = ?outcome.buckets,
            "Progressed plan"
        );
        let plan = Plan::new(
            program.id,
            PlanOrigin::Log(log.id),
            PlanKind::Progression,
            outcome.shortlist,
            Some(trend),
            now,
        );
        Ok((plan, Some(check)))
    }

    async fn progression_check(
        &self,
        program_id: Uuid,
        latest: Option<&Plan>,
        now: DateTime<Utc>,
    ) -> AppResult<ProgressionCheck> {
        let Some(plan) = latest else {
            return Ok(check_progression(None, 0, now, &self.config.progression));
        };
        let logs_since = self
            .logs
            .logs_since(program_id, plan.shortlist_generated_at)
            .await?;
        Ok(check_progression(
            Some(plan.shortlist_generated_at),
            logs_since,
            now,
            &self.config.progression,
        ))
    }

    /// First shortlist for a program that skipped onboarding
    ///
    /// The program area alone is mapped at low confidence, which keeps the
    /// selection to mobility and isometric work.
    fn area_shortlist(&self, program: &Program) -> AppResult<Vec<ShortlistItem>> {
        let inference = PatternInference {
            suspected_pattern: program.area.clone(),
            recommended_focus: Vec::new(),
            confidence: ConfidenceLevel::Low,
            area: Some(program.area.clone()),
        };
        let mapping = self.mapper.map(&inference);
        debug!(program.id = %program.id, buckets = ?mapping.buckets, "Mapped program area");
        self.selector()
            .select_initial(&mapping.buckets)
            .map_err(|e| e.with_program_id(program.id))
    }

    fn selector(&self) -> PlanSelector<'_> {
        PlanSelector::with_config(self.catalog.as_ref(), self.config.progression.clone())
    }

    async fn advise(
        &self,
        program: &Program,
        shortlist: &[ShortlistItem],
        trend: Option<Trend>,
        plan_kind: PlanKind,
        log_ids: Vec<Uuid>,
        now: DateTime<Utc>,
    ) -> Option<AdviceOutcome> {
        let service = self.advice.as_ref()?;
        let context = AdviceContext {
            user_id: program.user_id,
            program_id: program.id,
            area: program.area.clone(),
            trend,
            plan_kind,
            log_ids,
        };
        Some(service.advise(shortlist, &context, now).await)
    }
}

fn ensure_active(program: &Program, action: &str) -> AppResult<()> {
    if program.is_active() {
        return Ok(());
    }
    Err(AppError::new(
        ErrorCode::InvalidStateTransition,
        format!("Cannot {action} a {} program", program.status),
    )
    .with_program_id(program.id))
}
