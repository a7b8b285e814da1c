// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod goals;
pub mod stats;

pub use activity::{Activity, ActivityType, NewActivity};
pub use goals::{Goals, GoalsUpdate};
pub use stats::{
    DashboardStats, GoalProgress, Insight, InsightKind, SeriesPoint, TypeDistribution,
    WeeklySummary,
};
