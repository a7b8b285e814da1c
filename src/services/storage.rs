// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snapshot persistence on top of a key-value store.
//!
//! Activities and goals live under two independent keys. Each value is
//! wrapped in a versioned envelope:
//!
//! ```json
//! {"schemaVersion": 1, "data": [...]}
//! ```
//!
//! Values written by the legacy tracker carry no envelope; they are treated
//! as schema version 0 and migrated on load. Anything unreadable falls back
//! to the defaults for that key.

use crate::db::{keys, KeyValueStore, StorageError};
use crate::models::{Activity, Goals};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Newest schema version this build reads and the one it writes.
pub const SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    schema_version: u64,
    data: T,
}

/// In-memory state restored from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub activities: Vec<Activity>,
    pub goals: Goals,
}

/// Loads and saves snapshots through a key-value store.
pub struct StorageAdapter {
    store: Box<dyn KeyValueStore>,
}

impl StorageAdapter {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted snapshot.
    ///
    /// Never fails: a missing, corrupt or too-new value yields the default
    /// for that half of the snapshot.
    pub fn load(&self) -> Snapshot {
        let activities = self
            .load_value::<Vec<Activity>>(keys::ACTIVITIES)
            .unwrap_or_default();
        let goals = self.load_value::<Goals>(keys::GOALS).unwrap_or_default();

        tracing::info!(
            activities = activities.len(),
            daily_steps = goals.daily_steps,
            weekly_workouts = goals.weekly_workouts,
            daily_calories = goals.daily_calories,
            "Loaded snapshot"
        );

        Snapshot { activities, goals }
    }

    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read_value(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable stored value, using defaults");
                None
            }
        }
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        let parsed: Value = serde_json::from_str(&raw).map_err(|e| parse_error(key, e))?;
        if parsed.is_null() {
            return Ok(None);
        }

        let data = migrate(key, parsed)?;
        serde_json::from_value(data)
            .map(Some)
            .map_err(|e| parse_error(key, e))
    }

    /// Persist both values. Both writes are attempted; the first failure is
    /// returned.
    pub fn save(&mut self, activities: &[Activity], goals: &Goals) -> Result<(), StorageError> {
        let activities_result = self.write_value(keys::ACTIVITIES, activities);
        let goals_result = self.write_value(keys::GOALS, goals);

        activities_result.and(goals_result)?;
        tracing::debug!(activities = activities.len(), "Saved snapshot");
        Ok(())
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, key: &str, data: &T) -> Result<(), StorageError> {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            data,
        };
        let json = serde_json::to_string(&envelope).map_err(|e| StorageError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, &json)
    }
}

fn parse_error(key: &str, e: serde_json::Error) -> StorageError {
    StorageError::Parse {
        key: key.to_string(),
        message: e.to_string(),
    }
}

/// Bring a stored value up to `SCHEMA_VERSION` and return its payload.
fn migrate(key: &str, value: Value) -> Result<Value, StorageError> {
    let (version, mut data) = match value {
        Value::Object(mut obj) if obj.contains_key("schemaVersion") => {
            let version = obj
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .ok_or_else(|| StorageError::Parse {
                    key: key.to_string(),
                    message: "schemaVersion is not a non-negative integer".to_string(),
                })?;
            let data = obj.remove("data").unwrap_or(Value::Null);
            (version, data)
        }
        legacy => (0, legacy),
    };

    if version > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedVersion {
            key: key.to_string(),
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    if version == 0 {
        tracing::info!(key, "Migrating legacy value to schema version 1");
        migrate_v0_to_v1(key, &mut data);
    }

    Ok(data)
}

/// The legacy tracker stored numbers as whatever the form produced and kept
/// empty notes as `""`.
fn migrate_v0_to_v1(key: &str, data: &mut Value) {
    match (key, data) {
        (keys::ACTIVITIES, Value::Array(records)) => {
            for record in records.iter_mut().filter_map(Value::as_object_mut) {
                coerce_integer(record, "value");
                if record.get("notes").and_then(Value::as_str) == Some("") {
                    record.remove("notes");
                }
                if record.get("notes").is_some_and(Value::is_null) {
                    record.remove("notes");
                }
            }
        }
        (keys::GOALS, Value::Object(goals)) => {
            for field in ["dailySteps", "weeklyWorkouts", "dailyCalories"] {
                coerce_integer(goals, field);
            }
        }
        _ => {}
    }
}

/// Rewrite a float or numeric-string field as a non-negative integer.
/// Values that cannot be coerced are left for deserialization to reject.
fn coerce_integer(obj: &mut Map<String, Value>, field: &str) {
    let Some(current) = obj.get(field) else {
        return;
    };
    if current.is_u64() {
        return;
    }

    let number = match current {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    if let Some(n) = number.filter(|n| n.is_finite() && *n >= 0.0) {
        obj.insert(field.to_string(), Value::from(n.round() as u64));
    }
}
