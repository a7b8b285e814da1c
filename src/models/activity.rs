// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity record model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Kind of logged fitness event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityType {
    Steps,
    Workout,
    Calories,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Steps,
        ActivityType::Workout,
        ActivityType::Calories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Steps => "steps",
            ActivityType::Workout => "workout",
            ActivityType::Calories => "calories",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown activity type: {0}")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(ActivityType::Steps),
            "workout" => Ok(ActivityType::Workout),
            "calories" => Ok(ActivityType::Calories),
            other => Err(UnknownActivityType(other.to_string())),
        }
    }
}

/// Stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Opaque identifier, unique within one store
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Steps taken, workouts done, or calories burned
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub value: u64,
    /// Calendar day the activity belongs to (no time component)
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Activity fields as submitted by the entry form (no id, no timestamps).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[validate(range(min = 1, message = "value must be greater than 0"))]
    pub value: u64,
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 500, message = "notes are too long"))]
    pub notes: Option<String>,
}

impl NewActivity {
    pub fn new(activity_type: ActivityType, value: u64, date: NaiveDate) -> Self {
        Self {
            activity_type,
            value,
            date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Trimmed notes, with blank notes collapsed to `None`.
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_parses_lowercase_names() {
        assert_eq!("steps".parse::<ActivityType>().unwrap(), ActivityType::Steps);
        assert_eq!(
            "workout".parse::<ActivityType>().unwrap(),
            ActivityType::Workout
        );
        assert!("Steps".parse::<ActivityType>().is_err());
        assert!("all".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_activity_serializes_camel_case() {
        let activity = Activity {
            id: "abc".to_string(),
            activity_type: ActivityType::Calories,
            value: 450,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            notes: None,
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "calories");
        assert_eq!(json["date"], "2024-01-02");
        assert!(json.get("notes").is_none());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_new_activity_rejects_zero_value() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let input = NewActivity::new(ActivityType::Steps, 0, date);
        assert!(input.validate().is_err());

        let input = NewActivity::new(ActivityType::Steps, 1, date);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_activity_rejects_long_notes() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let input = NewActivity::new(ActivityType::Workout, 1, date).with_notes("x".repeat(501));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_normalized_notes_drops_blank() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let blank = NewActivity::new(ActivityType::Steps, 10, date).with_notes("   ");
        assert_eq!(blank.normalized_notes(), None);

        let padded = NewActivity::new(ActivityType::Steps, 10, date).with_notes("  park loop ");
        assert_eq!(padded.normalized_notes().as_deref(), Some("park loop"));
    }
}
