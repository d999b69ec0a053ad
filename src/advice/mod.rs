// ABOUTME: Advice formatter contract, canned trend fallbacks, and the cache-gated advice service
// ABOUTME: Formatter errors and timeouts never escape; callers always receive advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Advice
//!
//! Natural-language coaching is produced by an external [`AdviceFormatter`].
//! The engine only depends on its input/output contract. [`AdviceService`]
//! consults the [`AdviceCache`] first, calls the formatter on a miss under a
//! deadline, and substitutes a fixed message per trend when the formatter
//! fails or times out.

use crate::cache::{AdviceCache, AdviceCacheConfig};
use crate::config::EngineConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rehab_core::constants::cache::DEFAULT_FORMATTER_TIMEOUT_MS;
use rehab_core::errors::{AppError, AppResult};
use rehab_core::models::{PlanKind, ShortlistItem, Trend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, warn};
use uuid::Uuid;

const FORMATTER_SERVICE: &str = "advice_formatter";

/// Coaching text attached to a shortlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advice {
    /// One-sentence summary
    pub summary: String,
    /// Short coaching points
    pub bullets: Vec<String>,
    /// Safety caution, when the formatter has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
}

/// What the formatter knows about the plan it is describing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdviceContext {
    /// Owner of the program
    pub user_id: Uuid,
    /// Program the plan belongs to
    pub program_id: Uuid,
    /// Body area of the program
    pub area: String,
    /// Trend at generation, absent for onboarding plans
    pub trend: Option<Trend>,
    /// How the plan was produced
    pub plan_kind: PlanKind,
    /// Logs the trend was computed from
    pub log_ids: Vec<Uuid>,
}

/// External natural-language formatter
#[async_trait]
pub trait AdviceFormatter: Send + Sync {
    /// Describe a shortlist in coaching language
    ///
    /// # Errors
    ///
    /// Any error; the advice service replaces it with a canned fallback
    async fn format(&self, shortlist: &[ShortlistItem], context: &AdviceContext)
        -> AppResult<Advice>;
}

/// Where a piece of advice came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    /// Served from the advice cache
    Cache,
    /// Fresh formatter output
    Formatter,
    /// Canned message after a formatter failure
    Fallback,
}

/// Advice plus its provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdviceOutcome {
    /// Advice shown to the user
    pub advice: Advice,
    /// Provenance
    pub source: AdviceSource,
}

/// Fixed advice used when the formatter is unavailable
///
/// One message per trend, plus one for plans generated without a trend.
#[must_use]
pub fn fallback_advice(trend: Option<Trend>) -> Advice {
    let (summary, bullets): (&str, &[&str]) = match trend {
        Some(Trend::Improving) => (
            "Your symptoms are improving. Keep building on this progress.",
            &[
                "Complete each exercise with controlled movement",
                "Increase effort gradually and only while symptoms stay settled",
            ],
        ),
        Some(Trend::Stable) => (
            "Your symptoms are holding steady. Consistency is the goal this week.",
            &[
                "Keep to your current routine",
                "Log your symptoms daily so changes are picked up early",
            ],
        ),
        Some(Trend::Worse) => (
            "Your symptoms have flared up. Your plan has been eased to match.",
            &[
                "Work within a comfortable range",
                "Stop any exercise that sharply increases pain",
            ],
        ),
        None => (
            "Welcome to your plan. These starting exercises are deliberately gentle.",
            &[
                "Focus on form rather than effort",
                "Log how you feel each day so the plan can adapt",
            ],
        ),
    };

    Advice {
        summary: summary.to_owned(),
        bullets: bullets.iter().map(|&b| b.to_owned()).collect(),
        caution: Some(
            "Seek professional advice if pain becomes severe or you notice new symptoms."
                .to_owned(),
        ),
    }
}

/// Cache-gated formatter calls with a deadline and canned fallback
#[derive(Clone)]
pub struct AdviceService {
    formatter: Arc<dyn AdviceFormatter>,
    cache: Arc<Mutex<AdviceCache>>,
    timeout: Duration,
}

impl AdviceService {
    /// Create a service with its own cache
    #[must_use]
    pub fn new(
        formatter: Arc<dyn AdviceFormatter>,
        cache_config: &AdviceCacheConfig,
        timeout: Duration,
    ) -> Self {
        Self::with_cache(
            formatter,
            Arc::new(Mutex::new(AdviceCache::new(cache_config))),
            timeout,
        )
    }

    /// Create a service around an existing cache
    #[must_use]
    pub const fn with_cache(
        formatter: Arc<dyn AdviceFormatter>,
        cache: Arc<Mutex<AdviceCache>>,
        timeout: Duration,
    ) -> Self {
        Self {
            formatter,
            cache,
            timeout,
        }
    }

    /// Create a service with the cache settings and deadline of `config`
    #[must_use]
    pub fn from_config(formatter: Arc<dyn AdviceFormatter>, config: &EngineConfig) -> Self {
        Self::new(formatter, &config.advice_cache, config.formatter_timeout)
    }

    /// Create a service with default cache settings and timeout
    #[must_use]
    pub fn with_defaults(formatter: Arc<dyn AdviceFormatter>) -> Self {
        Self::new(
            formatter,
            &AdviceCacheConfig::default(),
            Duration::from_millis(DEFAULT_FORMATTER_TIMEOUT_MS),
        )
    }

    /// Shared handle on the cache
    #[must_use]
    pub fn cache(&self) -> Arc<Mutex<AdviceCache>> {
        Arc::clone(&self.cache)
    }

    /// Advice for a shortlist
    ///
    /// Never fails: formatter errors and timeouts yield the fallback for the
    /// context's trend. Fallbacks are not cached, so the next request for the
    /// same log set retries the formatter.
    pub async fn advise(
        &self,
        shortlist: &[ShortlistItem],
        context: &AdviceContext,
        now: DateTime<Utc>,
    ) -> AdviceOutcome {
        let key = AdviceCache::derive_key(&context.log_ids, context.user_id, context.program_id);

        if let Some(advice) = self.cache.lock().await.get(&key, now) {
            debug!(program.id = %context.program_id, key = %key, "Advice cache hit");
            return AdviceOutcome {
                advice,
                source: AdviceSource::Cache,
            };
        }
        debug!(program.id = %context.program_id, key = %key, "Advice cache miss");

        match self.call_formatter(shortlist, context).await {
            Ok(advice) => {
                self.cache.lock().await.set(key, advice.clone(), now);
                AdviceOutcome {
                    advice,
                    source: AdviceSource::Formatter,
                }
            }
            Err(e) => {
                warn!(
                    program.id = %context.program_id,
                    error = %e,
                    "Advice formatter failed, using fallback advice"
                );
                AdviceOutcome {
                    advice: fallback_advice(context.trend),
                    source: AdviceSource::Fallback,
                }
            }
        }
    }

    async fn call_formatter(
        &self,
        shortlist: &[ShortlistItem],
        context: &AdviceContext,
    ) -> AppResult<Advice> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        time::timeout(self.timeout, self.formatter.format(shortlist, context))
            .await
            .map_err(|_| AppError::external_timeout(FORMATTER_SERVICE, timeout_ms))?
    }
}
