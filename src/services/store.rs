// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity store.
//!
//! Holds activities in insertion order. The store itself never touches
//! persistence; the tracker saves after every mutation.

use crate::models::{Activity, ActivityType, NewActivity};
use crate::time_utils::days_before;
use chrono::{DateTime, NaiveDate, Utc};

/// Source of activity identifiers.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `act-1`, `act-2`, ... identifiers.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("act-{}", self.next)
    }
}

/// Error for operations that reference an unknown activity id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Activity not found: {0}")]
pub struct NotFound(pub String);

/// Ordered collection of activity records.
pub struct ActivityStore {
    activities: Vec<Activity>,
    ids: Box<dyn IdGenerator>,
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::new(Box::new(UuidGenerator))
    }
}

impl ActivityStore {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            activities: Vec::new(),
            ids,
        }
    }

    /// Replace the whole collection (used when loading a snapshot).
    pub fn replace_all(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
    }

    pub fn all(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Append a new record with a fresh id and creation timestamp.
    pub fn add(&mut self, input: NewActivity, now: DateTime<Utc>) -> &Activity {
        let mut id = self.ids.next_id();
        // Ids must stay unique within the store.
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }

        let notes = input.normalized_notes();
        let index = self.activities.len();
        self.activities.push(Activity {
            id,
            activity_type: input.activity_type,
            value: input.value,
            date: input.date,
            notes,
            created_at: Some(now),
            updated_at: None,
        });
        &self.activities[index]
    }

    /// Replace the fields of an existing record, keeping its position.
    pub fn update(
        &mut self,
        id: &str,
        input: NewActivity,
        now: DateTime<Utc>,
    ) -> Result<&Activity, NotFound> {
        let notes = input.normalized_notes();
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| NotFound(id.to_string()))?;

        activity.activity_type = input.activity_type;
        activity.value = input.value;
        activity.date = input.date;
        activity.notes = notes;
        activity.updated_at = Some(now);
        Ok(&*activity)
    }

    pub fn remove(&mut self, id: &str) -> Result<Activity, NotFound> {
        let index = self
            .activities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| NotFound(id.to_string()))?;
        Ok(self.activities.remove(index))
    }

    /// Activities matching an optional type and an optional trailing window.
    ///
    /// `days_back = Some(0)` keeps only `today`; `Some(n)` keeps dates on or
    /// after `today - n`; `None` applies no date filter.
    pub fn query(
        &self,
        type_filter: Option<ActivityType>,
        days_back: Option<u32>,
        today: NaiveDate,
    ) -> Vec<&Activity> {
        filter_activities(&self.activities, type_filter, days_back, today).collect()
    }

    /// Sum of `value` over `query` results.
    pub fn sum(
        &self,
        type_filter: Option<ActivityType>,
        days_back: Option<u32>,
        today: NaiveDate,
    ) -> u64 {
        sum_values(&self.activities, type_filter, days_back, today)
    }
}

pub(crate) fn filter_activities<'a>(
    activities: &'a [Activity],
    type_filter: Option<ActivityType>,
    days_back: Option<u32>,
    today: NaiveDate,
) -> impl Iterator<Item = &'a Activity> + 'a {
    let cutoff = days_back.map(|n| days_before(today, u64::from(n)));
    activities.iter().filter(move |a| {
        type_filter.map_or(true, |t| a.activity_type == t)
            && match days_back {
                Some(0) => a.date == today,
                _ => cutoff.map_or(true, |c| a.date >= c),
            }
    })
}

pub(crate) fn sum_values(
    activities: &[Activity],
    type_filter: Option<ActivityType>,
    days_back: Option<u32>,
    today: NaiveDate,
) -> u64 {
    filter_activities(activities, type_filter, days_back, today)
        .map(|a| a.value)
        .fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn now() -> DateTime<Utc> {
        d(2024, 1, 10).and_hms_opt(9, 0, 0).unwrap().and_utc()
    }

    fn store() -> ActivityStore {
        ActivityStore::new(Box::new(SequentialIds::default()))
    }

    #[test]
    fn test_add_assigns_id_and_timestamp() {
        let mut store = store();
        let added = store
            .add(
                NewActivity::new(ActivityType::Steps, 4000, d(2024, 1, 10)),
                now(),
            )
            .clone();

        assert_eq!(added.id, "act-1");
        assert_eq!(added.created_at, Some(now()));
        assert_eq!(added.updated_at, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut store = ActivityStore::default();
        let a = store
            .add(NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 1)), now())
            .id
            .clone();
        let b = store
            .add(NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 1)), now())
            .id
            .clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_skips_colliding_id() {
        let mut store = store();
        store.replace_all(vec![Activity {
            id: "act-1".to_string(),
            activity_type: ActivityType::Workout,
            value: 1,
            date: d(2024, 1, 1),
            notes: None,
            created_at: None,
            updated_at: None,
        }]);

        let added = store.add(
            NewActivity::new(ActivityType::Workout, 1, d(2024, 1, 2)),
            now(),
        );
        assert_eq!(added.id, "act-2");
    }

    #[test]
    fn test_update_keeps_position_and_created_at() {
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Steps, 100, d(2024, 1, 9)), now());
        store.add(NewActivity::new(ActivityType::Steps, 200, d(2024, 1, 9)), now());

        let later = now() + chrono::Duration::hours(1);
        let updated = store
            .update(
                "act-1",
                NewActivity::new(ActivityType::Calories, 300, d(2024, 1, 8)).with_notes("fixed"),
                later,
            )
            .unwrap()
            .clone();

        assert_eq!(updated.activity_type, ActivityType::Calories);
        assert_eq!(updated.value, 300);
        assert_eq!(updated.notes.as_deref(), Some("fixed"));
        assert_eq!(updated.created_at, Some(now()));
        assert_eq!(updated.updated_at, Some(later));
        assert_eq!(store.all()[0].id, "act-1");
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let mut store = store();
        let input = NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 1));

        assert_eq!(
            store.update("missing", input, now()).unwrap_err(),
            NotFound("missing".to_string())
        );
        assert!(store.remove("missing").is_err());
    }

    #[test]
    fn test_remove_returns_record() {
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 1)), now());
        store.add(NewActivity::new(ActivityType::Steps, 2, d(2024, 1, 1)), now());

        let removed = store.remove("act-1").unwrap();
        assert_eq!(removed.value, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("act-1").is_none());
    }

    #[test]
    fn test_query_today_only() {
        let today = d(2024, 1, 10);
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Steps, 500, today), now());
        store.add(NewActivity::new(ActivityType::Steps, 700, d(2024, 1, 9)), now());
        store.add(NewActivity::new(ActivityType::Calories, 50, today), now());

        let steps_today = store.query(Some(ActivityType::Steps), Some(0), today);
        assert_eq!(steps_today.len(), 1);
        assert_eq!(store.sum(Some(ActivityType::Steps), Some(0), today), 500);
        assert_eq!(store.sum(None, Some(0), today), 550);
    }

    #[test]
    fn test_query_days_back_is_inclusive() {
        let today = d(2024, 1, 10);
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 3)), now());
        store.add(NewActivity::new(ActivityType::Steps, 10, d(2024, 1, 4)), now());
        store.add(NewActivity::new(ActivityType::Steps, 100, d(2024, 1, 10)), now());

        assert_eq!(store.sum(Some(ActivityType::Steps), Some(6), today), 110);
        assert_eq!(store.sum(Some(ActivityType::Steps), Some(7), today), 111);
        assert_eq!(store.sum(Some(ActivityType::Steps), None, today), 111);
    }

    #[test]
    fn test_query_keeps_future_dates_in_window() {
        let today = d(2024, 1, 10);
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Workout, 1, d(2024, 1, 12)), now());

        assert_eq!(store.query(None, Some(3), today).len(), 1);
        assert!(store.query(None, Some(0), today).is_empty());
    }

    #[test]
    fn test_today_only_sum_ignores_future_dates() {
        let today = d(2024, 1, 10);
        let mut store = store();
        store.add(NewActivity::new(ActivityType::Steps, 400, today), now());
        store.add(NewActivity::new(ActivityType::Steps, 900, d(2024, 1, 11)), now());
        store.add(NewActivity::new(ActivityType::Steps, 800, d(2024, 2, 1)), now());

        assert_eq!(store.sum(Some(ActivityType::Steps), Some(0), today), 400);
        assert_eq!(store.sum(Some(ActivityType::Steps), Some(1), today), 2100);
    }

    #[test]
    fn test_replay_is_deterministic() {
        fn replay() -> Vec<Activity> {
            let mut store = store();
            store.add(NewActivity::new(ActivityType::Steps, 1, d(2024, 1, 1)), now());
            store.add(NewActivity::new(ActivityType::Workout, 1, d(2024, 1, 2)), now());
            store.add(NewActivity::new(ActivityType::Calories, 9, d(2024, 1, 3)), now());
            store
                .update(
                    "act-2",
                    NewActivity::new(ActivityType::Workout, 2, d(2024, 1, 2)),
                    now(),
                )
                .unwrap();
            store.remove("act-1").unwrap();
            store.all().to_vec()
        }

        assert_eq!(replay(), replay());
    }
}
