// ABOUTME: Advice cache deduplicating formatter calls per user, program and log set
// ABOUTME: Bounded by LRU capacity, expires entries by TTL, sweeps expired entries every N inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Advice Cache
//!
//! The key is a short digest of the sorted log ids plus the user and program
//! ids, so the same log set always maps to the same key regardless of the
//! order the ids were supplied in, and any new log changes the key.
//!
//! The cache is owned by the engine and is not internally synchronized; the
//! advice service wraps it in an async mutex. Two requests racing on the
//! same missing key can both reach the formatter; the later `set` wins.

use crate::advice::Advice;
use chrono::{DateTime, Utc};
use lru::LruCache;
use rehab_core::constants::cache::{
    ADVICE_KEY_HEX_LEN, DEFAULT_ADVICE_MAX_ENTRIES, DEFAULT_ADVICE_TTL_SECS,
    DEFAULT_SWEEP_EVERY_INSERTS,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Advice cache tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdviceCacheConfig {
    /// Maximum age of a served entry
    pub ttl: Duration,
    /// LRU capacity
    pub max_entries: usize,
    /// Inserts between full sweeps of expired entries
    pub sweep_every: u32,
}

impl Default for AdviceCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_ADVICE_TTL_SECS),
            max_entries: DEFAULT_ADVICE_MAX_ENTRIES,
            sweep_every: DEFAULT_SWEEP_EVERY_INSERTS,
        }
    }
}

/// One cached advice value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdviceCacheEntry {
    /// Derived cache key
    pub key: String,
    /// Formatter output
    pub advice: Advice,
    /// When the value was stored
    pub stored_at: DateTime<Utc>,
}

impl AdviceCacheEntry {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = (now - self.stored_at).num_milliseconds();
        age_ms > i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

/// LRU-bounded advice cache with TTL expiry
pub struct AdviceCache {
    entries: LruCache<String, AdviceCacheEntry>,
    ttl: Duration,
    sweep_every: u32,
    inserts_since_sweep: u32,
}

impl AdviceCache {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_ADVICE_MAX_ENTRIES) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create an empty cache
    #[must_use]
    pub fn new(config: &AdviceCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            entries: LruCache::new(capacity),
            ttl: config.ttl,
            sweep_every: config.sweep_every.max(1),
            inserts_since_sweep: 0,
        }
    }

    /// Derive the cache key for a user, program and set of log ids
    #[must_use]
    pub fn derive_key(log_ids: &[Uuid], user_id: Uuid, program_id: Uuid) -> String {
        let mut sorted: Vec<Uuid> = log_ids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut hasher = Sha256::new();
        for id in &sorted {
            hasher.update(id.as_bytes());
        }
        hasher.update(b"|");
        hasher.update(user_id.as_bytes());
        hasher.update(b"|");
        hasher.update(program_id.as_bytes());

        let mut key = hex::encode(hasher.finalize());
        key.truncate(ADVICE_KEY_HEX_LEN);
        key
    }

    /// Cached advice for `key` if stored no longer than the TTL ago
    ///
    /// An expired entry is evicted and reported as a miss.
    pub fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<Advice> {
        let expired = self.entries.get(key)?.is_expired(now, self.ttl);
        if expired {
            self.entries.pop(key);
            debug!(key, "Advice cache entry expired");
            return None;
        }
        self.entries.get(key).map(|entry| entry.advice.clone())
    }

    /// Store advice under `key`
    ///
    /// Every `sweep_every` inserts, all expired entries are removed first.
    pub fn set(&mut self, key: impl Into<String>, advice: Advice, now: DateTime<Utc>) {
        self.inserts_since_sweep += 1;
        if self.inserts_since_sweep >= self.sweep_every {
            self.cleanup(now);
        }

        let key = key.into();
        self.entries.put(
            key.clone(),
            AdviceCacheEntry {
                key,
                advice,
                stored_at: now,
            },
        );
    }

    /// Remove every expired entry and return how many were removed
    pub fn cleanup(&mut self, now: DateTime<Utc>) -> usize {
        self.inserts_since_sweep = 0;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.pop(key);
        }
        if !expired.is_empty() {
            debug!(removed = expired.len(), "Swept expired advice cache entries");
        }
        expired.len()
    }

    /// Number of stored entries, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AdviceCache {
    fn default() -> Self {
        Self::new(&AdviceCacheConfig::default())
    }
}
