//! Derived statistics returned to the view layer.
//!
//! None of these are persisted; they are recomputed from the activity
//! store and goals on every read.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One day bucket of a trailing series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Axis label; empty when the chart should skip this tick
    pub label: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum InsightKind {
    Success,
    Warning,
}

/// Qualitative feedback derived from fixed rule checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub text: String,
}

/// Record counts per activity type (distribution chart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TypeDistribution {
    pub steps: u32,
    pub workouts: u32,
    pub calories: u32,
}

/// Progress of one metric against its goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgress {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub target: u64,
    /// Rounded percentage in [0, 100]
    pub percent: u32,
}

/// Dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    pub today_steps: GoalProgress,
    pub week_workouts: GoalProgress,
    pub today_calories: GoalProgress,
}

/// Totals over the recent 7-day report window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub steps: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub workouts: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub calories: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub average_steps: u64,
}
