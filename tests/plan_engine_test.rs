// ABOUTME: End-to-end tests of the plan engine over the in-memory stores and default catalog
// ABOUTME: Covers onboarding plans, carry-forward, progression triggers, corrections, and adherence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use async_trait::async_trait;
use common::{at, at_hour, day, day0, init_test_logging};
use chrono::{DateTime, NaiveDate, Utc};
use rehab_plan_engine::advice::{Advice, AdviceContext, AdviceFormatter, AdviceService, AdviceSource};
use rehab_plan_engine::config::EngineConfig;
use rehab_plan_engine::errors::{AppError, AppResult, ErrorCode};
use rehab_plan_engine::intelligence::{
    ConfidenceLevel, PatternInference, ProgressionReason, StreakChange,
};
use rehab_plan_engine::models::{
    BodySide, Dosage, NewSymptomLog, Plan, PlanKind, PlanOrigin, Program, ProgramStatus,
    ShortlistItem, SymptomLog, Trend,
};
use rehab_plan_engine::stores::catalog::{default_catalog, InMemoryCatalog};
use rehab_plan_engine::stores::memory::InMemoryStore;
use rehab_plan_engine::stores::{LogStore, PlanStore, ProgramStore};
use rehab_plan_engine::PlanEngine;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    engine: PlanEngine,
    store: Arc<InMemoryStore>,
    program: Program,
}

async fn harness() -> Result<Harness> {
    harness_with_catalog(default_catalog()?).await
}

async fn harness_with_catalog(catalog: InMemoryCatalog) -> Result<Harness> {
    init_test_logging();
    let store = Arc::new(InMemoryStore::new());
    let program = store
        .save_program(Program::new(Uuid::new_v4(), "knee", BodySide::Left, day0()))
        .await?;
    let engine = PlanEngine::new(Arc::new(catalog), Arc::clone(&store));
    Ok(Harness {
        engine,
        store,
        program,
    })
}

fn ids(shortlist: &[ShortlistItem]) -> Vec<&str> {
    shortlist.iter().map(|s| s.exercise_id.as_str()).collect()
}

fn knee_inference() -> PatternInference {
    PatternInference {
        suspected_pattern: "Patellofemoral pain".to_owned(),
        recommended_focus: vec!["quad activation".to_owned()],
        confidence: ConfidenceLevel::Medium,
        area: Some("knee".to_owned()),
    }
}

struct CountingFormatter {
    calls: AtomicUsize,
}

#[async_trait]
impl AdviceFormatter for CountingFormatter {
    async fn format(
        &self,
        shortlist: &[ShortlistItem],
        context: &AdviceContext,
    ) -> AppResult<Advice> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Advice {
            summary: format!("{} exercises for your {}", shortlist.len(), context.area),
            bullets: Vec::new(),
            caution: None,
        })
    }
}

#[tokio::test]
async fn test_onboarding_plan_from_pattern_inference() -> Result<()> {
    let h = harness().await?;
    let profile_id = Uuid::new_v4();

    let outcome = h
        .engine
        .generate_initial_plan(h.program.id, profile_id, &knee_inference(), at_hour(0, 8))
        .await?;

    assert_eq!(
        outcome.mapping.buckets,
        vec!["mobility_knee", "isometric_knee", "activation_quads"]
    );
    assert_eq!(outcome.plan.kind, PlanKind::Initial);
    assert_eq!(outcome.plan.origin, PlanOrigin::Onboarding(profile_id));
    assert_eq!(outcome.plan.trend_at_generation, None);
    assert_eq!(
        ids(&outcome.plan.shortlist),
        vec!["knee_heel_slides", "knee_quad_sets", "quads_terminal_knee_ext"]
    );
    assert!(outcome.advice.is_none());
    assert_eq!(h.store.latest_plan(h.program.id).await?, Some(outcome.plan));
    Ok(())
}

#[tokio::test]
async fn test_first_log_without_onboarding_maps_program_area() -> Result<()> {
    let h = harness().await?;

    let outcome = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 5, 4), at(0))
        .await?;

    let plan = outcome.plan.unwrap();
    assert!(!outcome.corrected);
    assert_eq!(plan.kind, PlanKind::Initial);
    assert_eq!(plan.origin, PlanOrigin::Log(outcome.log.id));
    assert_eq!(ids(&plan.shortlist), vec!["knee_heel_slides", "knee_quad_sets"]);
    assert_eq!(plan.trend_at_generation, Some(Trend::Stable));
    assert!(outcome.progression.is_none());

    let streak = outcome.streak.unwrap();
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.change, StreakChange::Started);
    Ok(())
}

#[tokio::test]
async fn test_log_after_onboarding_carries_plan_forward() -> Result<()> {
    let h = harness().await?;
    let initial = h
        .engine
        .generate_initial_plan(h.program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await?
        .plan;

    let outcome = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 5, 4), at(0))
        .await?;

    let plan = outcome.plan.unwrap();
    assert_eq!(plan.kind, PlanKind::CarryForward);
    assert_eq!(plan.shortlist, initial.shortlist);
    assert_eq!(plan.shortlist_generated_at, initial.shortlist_generated_at);
    assert_ne!(plan.id, initial.id);
    assert_eq!(
        outcome.progression.unwrap().reason,
        ProgressionReason::NotYetDue
    );
    Ok(())
}

#[tokio::test]
async fn test_third_log_since_plan_triggers_progression() -> Result<()> {
    let h = harness().await?;
    let pains = [6, 5, 4];
    for (n, pain) in (0_i64..).zip(pains) {
        let outcome = h
            .engine
            .record_log(NewSymptomLog::new(h.program.id, day(n), pain, 4), at(n))
            .await?;
        let expected = if n == 0 {
            PlanKind::Initial
        } else {
            PlanKind::CarryForward
        };
        assert_eq!(outcome.plan.unwrap().kind, expected, "day {n}");
    }

    let outcome = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(3), 3, 4), at(3))
        .await?;

    let progression = outcome.progression.unwrap();
    assert!(progression.should_progress);
    assert_eq!(progression.reason, ProgressionReason::LogsRecorded);
    assert_eq!(progression.logs_since_plan, Some(3));
    assert_eq!(outcome.trend.unwrap().trend, Trend::Improving);

    let plan = outcome.plan.unwrap();
    assert_eq!(plan.kind, PlanKind::Progression);
    assert_eq!(plan.trend_at_generation, Some(Trend::Improving));
    assert_eq!(plan.shortlist_generated_at, at(3));
    assert_eq!(
        ids(&plan.shortlist),
        vec!["knee_heel_slides", "knee_seated_extension_stretch", "knee_step_up"]
    );
    assert_eq!(plan.shortlist[2].dosage, Dosage::sets_reps(4, 10).with_rest(60));
    assert_eq!(plan.shortlist[2].rendered_dosage_text, "4 x 10 reps, rest 1 min");
    assert_eq!(plan.shortlist[0].dosage, Dosage::sets_reps(2, 8));

    // the new shortlist restarts the trigger
    let next = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(4), 3, 4), at(4))
        .await?;
    assert_eq!(next.plan.unwrap().kind, PlanKind::CarryForward);
    assert_eq!(h.store.plans_for(h.program.id).len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_seven_days_since_plan_triggers_progression() -> Result<()> {
    let h = harness().await?;
    h.engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 5, 5), at(0))
        .await?;

    let outcome = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(7), 5, 5), at(7))
        .await?;

    let progression = outcome.progression.unwrap();
    assert_eq!(progression.reason, ProgressionReason::DaysElapsed);
    assert_eq!(progression.days_since_plan, Some(7));

    let streak = outcome.streak.unwrap();
    assert_eq!(streak.change, StreakChange::Reset);
    assert_eq!(streak.current_streak, 1);

    let plan = outcome.plan.unwrap();
    assert_eq!(plan.kind, PlanKind::Progression);
    assert_eq!(plan.trend_at_generation, Some(Trend::Stable));
    assert_eq!(
        ids(&plan.shortlist),
        vec!["knee_heel_slides", "knee_seated_extension_stretch", "knee_quad_sets"]
    );
    Ok(())
}

#[tokio::test]
async fn test_same_day_log_is_a_correction() -> Result<()> {
    let h = harness().await?;
    let first = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 5, 4), at(0))
        .await?;

    let corrected = h
        .engine
        .record_log(
            NewSymptomLog::new(h.program.id, day(0), 3, 2).with_notes("felt better after lunch"),
            at_hour(0, 18),
        )
        .await?;

    assert!(corrected.corrected);
    assert!(corrected.plan.is_none());
    assert!(corrected.streak.is_none());
    assert_eq!(corrected.log.id, first.log.id);
    assert_eq!(corrected.log.pain, 3);
    assert_eq!(corrected.log.stiffness, 2);

    assert_eq!(h.store.count_logged_days(h.program.id).await?, 1);
    assert_eq!(h.store.plans_for(h.program.id).len(), 1);
    let program = h.store.get_program(h.program.id).await?;
    assert_eq!(program.current_streak, 1);
    Ok(())
}

#[tokio::test]
async fn test_streak_tolerates_one_missed_day() -> Result<()> {
    let h = harness().await?;
    for n in [0, 1, 3, 5] {
        h.engine
            .record_log(NewSymptomLog::new(h.program.id, day(n), 4, 4), at(n))
            .await?;
    }

    let program = h.store.get_program(h.program.id).await?;
    assert_eq!(program.current_streak, 4);
    assert_eq!(program.longest_streak, 4);
    assert_eq!(program.last_logged_date, Some(day(5)));

    h.engine
        .record_log(NewSymptomLog::new(h.program.id, day(9), 4, 4), at(9))
        .await?;
    let program = h.store.get_program(h.program.id).await?;
    assert_eq!(program.current_streak, 1);
    assert_eq!(program.longest_streak, 4);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_score_is_rejected_without_storing() -> Result<()> {
    let h = harness().await?;

    let err = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 11, 4), at(0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(h.store.recent_logs(h.program.id, 10).await?.is_empty());
    assert!(h.store.latest_plan(h.program.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_paused_program_refuses_logs() -> Result<()> {
    let h = harness().await?;
    let paused = h
        .engine
        .set_program_status(h.program.id, ProgramStatus::Paused)
        .await?;
    assert_eq!(paused.status, ProgramStatus::Paused);

    let err = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 4, 4), at(0))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    assert_eq!(err.context.program_id, Some(h.program.id));

    h.engine
        .set_program_status(h.program.id, ProgramStatus::Active)
        .await?;
    h.engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 4, 4), at(0))
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_status_transitions() -> Result<()> {
    let h = harness().await?;

    let noop = h
        .engine
        .set_program_status(h.program.id, ProgramStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(noop.code, ErrorCode::InvalidStateTransition);

    h.engine
        .set_program_status(h.program.id, ProgramStatus::Completed)
        .await?;
    let reopen = h
        .engine
        .set_program_status(h.program.id, ProgramStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(reopen.code, ErrorCode::InvalidStateTransition);
    assert_eq!(
        h.store.get_program(h.program.id).await?.status,
        ProgramStatus::Completed
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_program_is_not_found() -> Result<()> {
    let h = harness().await?;

    let err = h
        .engine
        .record_log(NewSymptomLog::new(Uuid::new_v4(), day(0), 4, 4), at(0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_plan_error() -> Result<()> {
    let h = harness_with_catalog(InMemoryCatalog::new(Vec::new())).await?;

    let err = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 4, 4), at(0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::EmptyPlan);
    assert_eq!(err.context.program_id, Some(h.program.id));
    // the log itself was already stored
    assert_eq!(h.store.count_logged_days(h.program.id).await?, 1);
    assert!(h.store.latest_plan(h.program.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_should_progress_reports_state() -> Result<()> {
    let h = harness().await?;
    let before = h.engine.should_progress(h.program.id, at(0)).await?;
    assert!(!before.should_progress);
    assert_eq!(before.reason, ProgressionReason::NoPriorPlan);

    h.engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 4, 4), at(0))
        .await?;

    let soon = h.engine.should_progress(h.program.id, at(3)).await?;
    assert_eq!(soon.reason, ProgressionReason::NotYetDue);
    assert_eq!(soon.days_since_plan, Some(3));

    let later = h.engine.should_progress(h.program.id, at(8)).await?;
    assert!(later.should_progress);
    assert_eq!(later.reason, ProgressionReason::DaysElapsed);
    Ok(())
}

#[tokio::test]
async fn test_adherence_report() -> Result<()> {
    let h = harness().await?;
    for (n, pain) in [(0, 6), (1, 5), (2, 4)] {
        h.engine
            .record_log(NewSymptomLog::new(h.program.id, day(n), pain, 4), at(n))
            .await?;
    }

    let report = h.engine.adherence_report(h.program.id, day(3)).await?;

    assert_eq!(report.current_streak, 3);
    assert_eq!(report.longest_streak, 3);
    assert!(report.streak_active);
    assert_eq!(report.last_logged_date, Some(day(2)));
    assert_eq!(report.days_logged, 3);
    assert!((report.adherence_rate - 0.75).abs() < 1e-9);
    assert!((report.weekly.this_week.avg_pain - 5.0).abs() < 1e-9);

    let stale = h.engine.adherence_report(h.program.id, day(6)).await?;
    assert!(!stale.streak_active);
    Ok(())
}

#[tokio::test]
async fn test_engine_attaches_and_caches_advice() -> Result<()> {
    init_test_logging();
    let formatter = Arc::new(CountingFormatter {
        calls: AtomicUsize::new(0),
    });
    let advice = AdviceService::with_defaults(formatter.clone());
    let program = Program::new(Uuid::new_v4(), "knee", BodySide::Right, day0());

    // two deployments over separate stores share one advice cache
    let store = Arc::new(InMemoryStore::new());
    store.save_program(program.clone()).await?;
    let engine = PlanEngine::new(Arc::new(default_catalog()?), Arc::clone(&store))
        .with_advice(advice.clone());
    let replica_store = Arc::new(InMemoryStore::new());
    replica_store.save_program(program.clone()).await?;
    let replica = PlanEngine::new(Arc::new(default_catalog()?), replica_store)
        .with_advice(advice);

    let first = engine
        .generate_initial_plan(program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await?;
    let first_advice = first.advice.unwrap();
    assert_eq!(first_advice.source, AdviceSource::Formatter);
    assert_eq!(first_advice.advice.summary, "3 exercises for your knee");

    // same user, program and (empty) log set
    let again = replica
        .generate_initial_plan(program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await?;
    assert_eq!(again.advice.unwrap().source, AdviceSource::Cache);

    let logged = engine
        .record_log(NewSymptomLog::new(program.id, day(0), 4, 4), at(0))
        .await?;
    assert_eq!(logged.advice.unwrap().source, AdviceSource::Formatter);

    let corrected = engine
        .record_log(NewSymptomLog::new(program.id, day(0), 3, 4), at_hour(0, 12))
        .await?;
    assert!(corrected.advice.is_none());

    assert_eq!(formatter.calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_plan_origin_links_back_to_its_log() -> Result<()> {
    let h = harness().await?;
    let onboarding = h
        .engine
        .generate_initial_plan(h.program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await?
        .plan;
    assert!(onboarding.is_initial());
    assert_eq!(onboarding.log_id(), None);

    let outcome = h
        .engine
        .record_log(NewSymptomLog::new(h.program.id, day(0), 5, 4), at(0))
        .await?;
    let plan = outcome.plan.unwrap();
    assert!(!plan.is_initial());
    assert_eq!(plan.log_id(), Some(outcome.log.id));
    Ok(())
}

#[tokio::test]
async fn test_onboarding_twice_is_refused() -> Result<()> {
    let h = harness().await?;
    h.engine
        .generate_initial_plan(h.program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await?;
    for n in 0..3 {
        h.engine
            .record_log(NewSymptomLog::new(h.program.id, day(n), 4, 4), at(n))
            .await?;
    }
    let latest = h.store.latest_plan(h.program.id).await?.unwrap();

    let err = h
        .engine
        .generate_initial_plan(h.program.id, Uuid::new_v4(), &knee_inference(), at(3))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    assert_eq!(err.context.program_id, Some(h.program.id));
    assert_eq!(h.store.plans_for(h.program.id).len(), 4);
    assert_eq!(h.store.latest_plan(h.program.id).await?, Some(latest));
    Ok(())
}

#[tokio::test]
async fn test_onboarding_paused_program_is_refused() -> Result<()> {
    let h = harness().await?;
    h.engine
        .set_program_status(h.program.id, ProgramStatus::Paused)
        .await?;

    let err = h
        .engine
        .generate_initial_plan(h.program.id, Uuid::new_v4(), &knee_inference(), at_hour(0, 8))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    assert_eq!(err.context.program_id, Some(h.program.id));
    assert!(h.store.latest_plan(h.program.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_configured_log_threshold_drives_progression() -> Result<()> {
    init_test_logging();
    let store = Arc::new(InMemoryStore::new());
    let program = store
        .save_program(Program::new(Uuid::new_v4(), "knee", BodySide::Left, day0()))
        .await?;
    let mut config = EngineConfig::default();
    config.intelligence.progression.logs_threshold = 2;
    let formatter: Arc<dyn AdviceFormatter> = Arc::new(CountingFormatter {
        calls: AtomicUsize::new(0),
    });
    let engine = PlanEngine::from_config(
        Arc::new(default_catalog()?),
        Arc::clone(&store),
        &config,
        Some(formatter),
    );
    assert_eq!(engine.config().progression.logs_threshold, 2);

    for n in 0..2 {
        let outcome = engine
            .record_log(NewSymptomLog::new(program.id, day(n), 4, 4), at(n))
            .await?;
        assert_ne!(outcome.plan.unwrap().kind, PlanKind::Progression, "day {n}");
    }
    let outcome = engine
        .record_log(NewSymptomLog::new(program.id, day(2), 4, 4), at(2))
        .await?;

    let progression = outcome.progression.unwrap();
    assert_eq!(progression.reason, ProgressionReason::LogsRecorded);
    assert_eq!(progression.logs_since_plan, Some(2));
    assert_eq!(outcome.plan.unwrap().kind, PlanKind::Progression);
    assert_eq!(outcome.advice.unwrap().source, AdviceSource::Formatter);
    Ok(())
}

/// Store whose log writes always fail
struct ReadOnlyLogs {
    inner: InMemoryStore,
}

#[async_trait]
impl LogStore for ReadOnlyLogs {
    async fn recent_logs(&self, program_id: Uuid, limit: usize) -> AppResult<Vec<SymptomLog>> {
        self.inner.recent_logs(program_id, limit).await
    }

    async fn logs_since(&self, program_id: Uuid, since: DateTime<Utc>) -> AppResult<u32> {
        self.inner.logs_since(program_id, since).await
    }

    async fn find_log_by_date(
        &self,
        program_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<SymptomLog>> {
        self.inner.find_log_by_date(program_id, date).await
    }

    async fn save_log(&self, _log: SymptomLog) -> AppResult<SymptomLog> {
        Err(AppError::storage("log table is read-only"))
    }

    async fn count_logged_days(&self, program_id: Uuid) -> AppResult<u32> {
        self.inner.count_logged_days(program_id).await
    }
}

#[async_trait]
impl PlanStore for ReadOnlyLogs {
    async fn latest_plan(&self, program_id: Uuid) -> AppResult<Option<Plan>> {
        self.inner.latest_plan(program_id).await
    }

    async fn save_plan(&self, plan: Plan) -> AppResult<Plan> {
        self.inner.save_plan(plan).await
    }
}

#[async_trait]
impl ProgramStore for ReadOnlyLogs {
    async fn get_program(&self, program_id: Uuid) -> AppResult<Program> {
        self.inner.get_program(program_id).await
    }

    async fn save_program(&self, program: Program) -> AppResult<Program> {
        self.inner.save_program(program).await
    }

    async fn update_streak_fields(
        &self,
        program_id: Uuid,
        current_streak: u32,
        longest_streak: u32,
        last_logged_date: NaiveDate,
    ) -> AppResult<()> {
        self.inner
            .update_streak_fields(program_id, current_streak, longest_streak, last_logged_date)
            .await
    }
}

#[tokio::test]
async fn test_store_failure_is_returned_unchanged() -> Result<()> {
    init_test_logging();
    let store = Arc::new(ReadOnlyLogs {
        inner: InMemoryStore::new(),
    });
    let program = store
        .save_program(Program::new(Uuid::new_v4(), "knee", BodySide::Left, day0()))
        .await?;
    let engine = PlanEngine::new(Arc::new(default_catalog()?), Arc::clone(&store));

    let err = engine
        .record_log(NewSymptomLog::new(program.id, day(0), 4, 4), at(0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::StorageError);
    assert_eq!(err.message, "log table is read-only");
    assert!(store.latest_plan(program.id).await?.is_none());
    assert_eq!(store.get_program(program.id).await?.current_streak, 0);
    Ok(())
}
