// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived statistics over the activity store.
//!
//! Everything here is a pure function of the activities, the goals and an
//! explicit `today`, so results can be recomputed on every read and tested
//! against fixed dates.

use crate::models::{
    Activity, ActivityType, DashboardStats, GoalProgress, Goals, Insight, InsightKind,
    SeriesPoint, TypeDistribution, WeeklySummary,
};
use crate::services::store::sum_values;
use crate::time_utils::days_before;
use chrono::{Days, NaiveDate};

pub use crate::time_utils::week_start;

/// Trailing windows up to this length are labelled by weekday.
const WEEKDAY_LABEL_MAX_DAYS: u32 = 7;
/// Longer windows label every Nth day, counted back from today.
const SPARSE_LABEL_EVERY: u32 = 5;
/// Days with steps needed for the consistency insight.
const CONSISTENT_ACTIVE_DAYS: usize = 5;
/// Window used by the report summary (`days_back`).
const SUMMARY_DAYS_BACK: u32 = 7;

/// Sum of `value` for one type on one calendar day.
pub fn daily_total(activities: &[Activity], activity_type: ActivityType, date: NaiveDate) -> u64 {
    activities
        .iter()
        .filter(|a| a.activity_type == activity_type && a.date == date)
        .map(|a| a.value)
        .fold(0u64, u64::saturating_add)
}

/// Number of workout records in the Monday-to-Sunday week containing `reference`.
pub fn weekly_workout_count(activities: &[Activity], reference: NaiveDate) -> u64 {
    let start = week_start(reference);
    let end = start.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
    activities
        .iter()
        .filter(|a| a.activity_type == ActivityType::Workout && a.date >= start && a.date < end)
        .count() as u64
}

/// Progress toward a target as a percentage clamped to `[0, 100]`.
///
/// A zero target yields 0% rather than an undefined ratio.
pub fn goal_progress(current: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (current as f64 / target as f64).min(1.0) * 100.0
}

/// `goal_progress` rounded for display.
pub fn progress_percent(current: u64, target: u64) -> u32 {
    goal_progress(current, target).round() as u32
}

fn progress(current: u64, target: u64) -> GoalProgress {
    GoalProgress {
        current,
        target,
        percent: progress_percent(current, target),
    }
}

/// Day-bucketed totals for `[today - window_days + 1, today]`, oldest first.
///
/// Days without matching records are zero-filled.
pub fn trailing_series(
    activities: &[Activity],
    activity_type: ActivityType,
    window_days: u32,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    (0..window_days)
        .rev()
        .map(|days_ago| {
            let date = days_before(today, u64::from(days_ago));
            SeriesPoint {
                date,
                label: series_label(date, days_ago, window_days),
                value: daily_total(activities, activity_type, date),
            }
        })
        .collect()
}

fn series_label(date: NaiveDate, days_ago: u32, window_days: u32) -> String {
    if window_days <= WEEKDAY_LABEL_MAX_DAYS {
        date.format("%a").to_string()
    } else if days_ago % SPARSE_LABEL_EVERY == 0 {
        date.format("%b %-d").to_string()
    } else {
        String::new()
    }
}

/// Record counts per type.
pub fn distribution(activities: &[Activity]) -> TypeDistribution {
    activities
        .iter()
        .fold(TypeDistribution::default(), |mut dist, a| {
            match a.activity_type {
                ActivityType::Steps => dist.steps += 1,
                ActivityType::Workout => dist.workouts += 1,
                ActivityType::Calories => dist.calories += 1,
            }
            dist
        })
}

/// Totals over the report window (`days_back = 7`).
pub fn seven_day_summary(activities: &[Activity], today: NaiveDate) -> WeeklySummary {
    let window = Some(SUMMARY_DAYS_BACK);
    let steps = sum_values(activities, Some(ActivityType::Steps), window, today);
    let calories = sum_values(activities, Some(ActivityType::Calories), window, today);
    let cutoff = days_before(today, u64::from(SUMMARY_DAYS_BACK));
    let workouts = activities
        .iter()
        .filter(|a| a.activity_type == ActivityType::Workout && a.date >= cutoff)
        .count() as u64;

    WeeklySummary {
        steps,
        workouts,
        calories,
        average_steps: (steps as f64 / 7.0).round() as u64,
    }
}

/// Dashboard stat cards: today's steps and calories, this week's workouts.
pub fn dashboard(activities: &[Activity], goals: &Goals, today: NaiveDate) -> DashboardStats {
    DashboardStats {
        today_steps: progress(
            daily_total(activities, ActivityType::Steps, today),
            goals.daily_steps,
        ),
        week_workouts: progress(
            weekly_workout_count(activities, today),
            goals.weekly_workouts,
        ),
        today_calories: progress(
            daily_total(activities, ActivityType::Calories, today),
            goals.daily_calories,
        ),
    }
}

/// Rule-based insights, evaluated in a fixed order. Every matching rule is
/// emitted.
pub fn insights(activities: &[Activity], goals: &Goals, today: NaiveDate) -> Vec<Insight> {
    let mut insights = Vec::new();

    let today_steps = daily_total(activities, ActivityType::Steps, today);
    if today_steps >= goals.daily_steps {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Daily Steps Goal Achieved! 🎉".to_string(),
            text: format!("You've reached {} steps today!", format_number(today_steps)),
        });
    }

    let week_workouts = weekly_workout_count(activities, today);
    if week_workouts >= goals.weekly_workouts {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Weekly Workout Goal Completed! 💪".to_string(),
            text: format!("You've completed {} workouts this week!", week_workouts),
        });
    }

    let active_days = trailing_series(activities, ActivityType::Steps, 7, today)
        .iter()
        .filter(|p| p.value > 0)
        .count();
    if active_days >= CONSISTENT_ACTIVE_DAYS {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Great Consistency! 🔥".to_string(),
            text: format!(
                "You've been active {} out of the last 7 days!",
                active_days
            ),
        });
    }

    if !activities.is_empty() && today_steps == 0 && week_workouts == 0 {
        insights.push(Insight {
            kind: InsightKind::Warning,
            title: "Time to Get Moving! ⏰".to_string(),
            text: "You haven't logged any activity today. Let's get started!".to_string(),
        });
    }

    insights
}

/// Format an integer with comma thousands separators (`11000` → `11,000`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Human-readable value for activity lists (`5,000 steps`, `2 workouts`).
pub fn value_label(activity_type: ActivityType, value: u64) -> String {
    match activity_type {
        ActivityType::Steps => format!("{} steps", format_number(value)),
        ActivityType::Workout if value == 1 => "1 workout".to_string(),
        ActivityType::Workout => format!("{} workouts", value),
        ActivityType::Calories => format!("{} cal", format_number(value)),
    }
}
