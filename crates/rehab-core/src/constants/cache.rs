// ABOUTME: Advice cache constants for TTL, capacity, and sweep cadence
// ABOUTME: Defaults for the in-process cache guarding the advice formatter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Advice cache TTL (1 hour) - advice only changes when a new log arrives
pub const DEFAULT_ADVICE_TTL_SECS: u64 = 3_600;

/// Maximum advice entries held before LRU eviction
pub const DEFAULT_ADVICE_MAX_ENTRIES: usize = 1_000;

/// Sweep expired entries once every this many insertions
pub const DEFAULT_SWEEP_EVERY_INSERTS: u32 = 50;

/// Number of hex characters kept from the advice key digest
pub const ADVICE_KEY_HEX_LEN: usize = 16;

/// Default deadline for one advice formatter call
pub const DEFAULT_FORMATTER_TIMEOUT_MS: u64 = 8_000;
