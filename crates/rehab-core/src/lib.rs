// ABOUTME: Core types and constants for the adaptive rehabilitation plan engine
// ABOUTME: Foundation crate with error handling, domain models, and rule constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rehab Core
//!
//! Foundation crate providing shared types and constants for the plan
//! engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Rule thresholds and cache defaults organized by domain
//! - **models**: Symptom logs, programs, catalog entries, dosages and plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Rule thresholds and defaults organized by domain
pub mod constants;

/// Core data models (`SymptomLog`, `Program`, `Plan`, etc.)
pub mod models;
