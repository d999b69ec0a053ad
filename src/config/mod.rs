// ABOUTME: Configuration module for the rehabilitation plan engine
// ABOUTME: Environment-only configuration with defaults from the core constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Engine configuration read from environment variables
pub mod environment;

pub use environment::EngineConfig;
