// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Goals record: the user's current numeric targets.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const DEFAULT_DAILY_STEPS: u64 = 10_000;
pub const DEFAULT_WEEKLY_WORKOUTS: u64 = 5;
pub const DEFAULT_DAILY_CALORIES: u64 = 500;

/// Current targets. Singleton, overwritten in place, no history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goals {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub daily_steps: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub weekly_workouts: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub daily_calories: u64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_steps: DEFAULT_DAILY_STEPS,
            weekly_workouts: DEFAULT_WEEKLY_WORKOUTS,
            daily_calories: DEFAULT_DAILY_CALORIES,
        }
    }
}

/// Field-by-field goal change; absent fields keep their current target.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoalsUpdate {
    #[validate(range(min = 1, message = "daily steps goal must be positive"))]
    pub daily_steps: Option<u64>,
    #[validate(range(min = 1, message = "weekly workouts goal must be positive"))]
    pub weekly_workouts: Option<u64>,
    #[validate(range(min = 1, message = "daily calories goal must be positive"))]
    pub daily_calories: Option<u64>,
}

impl Goals {
    /// Apply an update. Returns `true` if any target changed.
    pub fn apply(&mut self, update: &GoalsUpdate) -> bool {
        let before = *self;
        if let Some(steps) = update.daily_steps {
            self.daily_steps = steps;
        }
        if let Some(workouts) = update.weekly_workouts {
            self.weekly_workouts = workouts;
        }
        if let Some(calories) = update.daily_calories {
            self.daily_calories = calories;
        }
        before != *self
    }
}
