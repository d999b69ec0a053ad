// ABOUTME: Caching layer guarding calls to the external advice formatter
// ABOUTME: Content-keyed LRU cache with TTL expiry and amortized sweeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Advice cache keyed by the log set a plan was generated from
pub mod advice;

pub use advice::{AdviceCache, AdviceCacheConfig, AdviceCacheEntry};
