// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-day arithmetic and the tracker's clock.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};

/// Source of "now" for the tracker. Injected so tests can pin the date.
pub trait Clock: Send + Sync {
    /// Current calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;

    /// Current instant, used for record timestamps.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock using the local time zone for calendar days.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed date (noon UTC on that date).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now)
    }
}

/// Date `n` days before `date`, saturating at the earliest representable day.
pub fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// Monday at or before `date`. A Sunday maps to six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    days_before(date, u64::from(offset))
}
