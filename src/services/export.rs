// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV report export.

use crate::models::Activity;
use chrono::NaiveDate;
use std::fmt::Write;

const CSV_HEADER: &str = "Date,Type,Value,Notes\n";

/// Render activities as CSV, oldest date first.
///
/// Commas inside notes become semicolons, so notes containing commas do not
/// round-trip. Ties keep their store order.
pub fn to_csv(activities: &[Activity]) -> String {
    let mut sorted: Vec<&Activity> = activities.iter().collect();
    sorted.sort_by_key(|a| a.date);

    let mut csv = String::from(CSV_HEADER);
    for activity in sorted {
        let notes = activity
            .notes
            .as_deref()
            .map(|n| n.replace(',', ";"))
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(
            csv,
            "{},{},{},\"{}\"",
            activity.date, activity.activity_type, activity.value, notes
        );
    }
    csv
}

/// Download filename for a report generated on `today`.
pub fn report_filename(today: NaiveDate) -> String {
    format!("fittrack-report-{}.csv", today.format("%Y-%m-%d"))
}
