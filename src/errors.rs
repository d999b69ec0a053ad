// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError, ErrorCode and AppResult shared by every layer of the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rehab_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};
