// ABOUTME: Rehabilitation program model with status lifecycle and streak fields
// ABOUTME: Program, ProgramStatus and BodySide definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Program lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    /// Currently followed by the user
    #[default]
    Active,
    /// Temporarily suspended
    Paused,
    /// Finished, terminal
    Completed,
}

impl ProgramStatus {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `next` is an allowed transition
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused | Self::Completed) | (Self::Paused, Self::Active)
        )
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the body the program targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    /// Left side
    Left,
    /// Right side
    Right,
    /// Both sides or a midline structure
    Bilateral,
}

/// A rehabilitation program for one body area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    /// Program identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Body area, e.g. "knee"
    pub area: String,
    /// Affected side
    pub side: BodySide,
    /// First day of the program
    pub start_date: NaiveDate,
    /// Lifecycle status
    pub status: ProgramStatus,
    /// Current logging streak
    pub current_streak: u32,
    /// Longest logging streak ever reached
    pub longest_streak: u32,
    /// Most recent logged day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_logged_date: Option<NaiveDate>,
}

impl Program {
    /// Create a new active program with empty streak fields
    #[must_use]
    pub fn new(user_id: Uuid, area: impl Into<String>, side: BodySide, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            area: area.into(),
            side,
            start_date,
            status: ProgramStatus::Active,
            current_streak: 0,
            longest_streak: 0,
            last_logged_date: None,
        }
    }

    /// Move the program to a new status
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` for no-op or disallowed transitions
    pub fn transition_to(&mut self, next: ProgramStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(self.status, next).with_program_id(self.id));
        }
        self.status = next;
        Ok(())
    }

    /// Whether new logs may be recorded against this program
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProgramStatus::Active
    }
}
