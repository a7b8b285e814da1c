// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker context: the activity store, goals and their persistence.
//!
//! Every mutation follows the same sequence:
//! 1. Apply the change in memory
//! 2. Save the snapshot immediately
//! 3. Let callers derive views from the updated state
//!
//! A failed save is logged and reported through [`Persisted::durable`]; the
//! in-memory change is kept either way.

use crate::models::{
    Activity, ActivityType, DashboardStats, Goals, GoalsUpdate, Insight, NewActivity,
    SeriesPoint, TypeDistribution, WeeklySummary,
};
use crate::services::aggregation;
use crate::services::export;
use crate::services::storage::StorageAdapter;
use crate::services::store::{ActivityStore, IdGenerator, NotFound};
use crate::time_utils::Clock;
use chrono::NaiveDate;

/// Result of a mutation together with whether it reached storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Persisted<T> {
    pub value: T,
    pub durable: bool,
}

/// Explicit application context owned by the view layer.
pub struct Tracker {
    store: ActivityStore,
    goals: Goals,
    storage: StorageAdapter,
    clock: Box<dyn Clock>,
}

impl Tracker {
    /// Restore state from storage. Missing or corrupt data yields defaults.
    pub fn load(
        storage: StorageAdapter,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let snapshot = storage.load();
        let mut store = ActivityStore::new(ids);
        store.replace_all(snapshot.activities);

        Self {
            store,
            goals: snapshot.goals,
            storage,
            clock,
        }
    }

    /// Re-read storage, replacing in-memory state wholesale.
    pub fn reload(&mut self) {
        let snapshot = self.storage.load();
        self.store.replace_all(snapshot.activities);
        self.goals = snapshot.goals;
    }

    fn persist(&mut self, operation: &'static str) -> bool {
        match self.storage.save(self.store.all(), &self.goals) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Failed to persist snapshot; change kept in memory");
                false
            }
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub fn add_activity(&mut self, input: NewActivity) -> Persisted<Activity> {
        let now = self.clock.now();
        let activity = self.store.add(input, now).clone();
        tracing::info!(
            id = %activity.id,
            activity_type = %activity.activity_type,
            value = activity.value,
            date = %activity.date,
            "Added activity"
        );

        let durable = self.persist("add_activity");
        Persisted {
            value: activity,
            durable,
        }
    }

    pub fn update_activity(
        &mut self,
        id: &str,
        input: NewActivity,
    ) -> Result<Persisted<Activity>, NotFound> {
        let now = self.clock.now();
        let activity = self
            .store
            .update(id, input, now)
            .inspect_err(|e| tracing::debug!(error = %e, "Update ignored"))?
            .clone();
        tracing::info!(id, "Updated activity");

        let durable = self.persist("update_activity");
        Ok(Persisted {
            value: activity,
            durable,
        })
    }

    pub fn remove_activity(&mut self, id: &str) -> Result<Persisted<Activity>, NotFound> {
        let removed = self
            .store
            .remove(id)
            .inspect_err(|e| tracing::debug!(error = %e, "Remove ignored"))?;
        tracing::info!(id, "Removed activity");

        let durable = self.persist("remove_activity");
        Ok(Persisted {
            value: removed,
            durable,
        })
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.store.get(id)
    }

    pub fn all_activities(&self) -> &[Activity] {
        self.store.all()
    }

    /// Filtered activities, newest date first (ties keep store order).
    pub fn activities(
        &self,
        type_filter: Option<ActivityType>,
        days_back: Option<u32>,
    ) -> Vec<Activity> {
        let mut list: Vec<Activity> = self
            .store
            .query(type_filter, days_back, self.today())
            .into_iter()
            .cloned()
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    pub fn total(&self, type_filter: Option<ActivityType>, days_back: Option<u32>) -> u64 {
        self.store.sum(type_filter, days_back, self.today())
    }

    // ─── Goal Operations ─────────────────────────────────────────

    pub fn goals(&self) -> Goals {
        self.goals
    }

    /// Apply a field-by-field goal change and persist it.
    pub fn update_goals(&mut self, update: &GoalsUpdate) -> Persisted<Goals> {
        let changed = self.goals.apply(update);
        tracing::info!(
            changed,
            daily_steps = self.goals.daily_steps,
            weekly_workouts = self.goals.weekly_workouts,
            daily_calories = self.goals.daily_calories,
            "Updated goals"
        );

        let durable = self.persist("update_goals");
        Persisted {
            value: self.goals,
            durable,
        }
    }

    /// Overwrite all three targets at once and persist.
    pub fn replace_goals(&mut self, goals: Goals) -> Persisted<Goals> {
        self.goals = goals;
        tracing::info!(?goals, "Replaced goals");

        let durable = self.persist("replace_goals");
        Persisted {
            value: self.goals,
            durable,
        }
    }

    // ─── Derived Views ───────────────────────────────────────────

    pub fn dashboard(&self) -> DashboardStats {
        aggregation::dashboard(self.store.all(), &self.goals, self.today())
    }

    pub fn series(&self, activity_type: ActivityType, window_days: u32) -> Vec<SeriesPoint> {
        aggregation::trailing_series(self.store.all(), activity_type, window_days, self.today())
    }

    pub fn weekly_workouts(&self, reference: NaiveDate) -> u64 {
        aggregation::weekly_workout_count(self.store.all(), reference)
    }

    pub fn daily_total(&self, activity_type: ActivityType, date: NaiveDate) -> u64 {
        aggregation::daily_total(self.store.all(), activity_type, date)
    }

    pub fn insights(&self) -> Vec<Insight> {
        aggregation::insights(self.store.all(), &self.goals, self.today())
    }

    pub fn summary(&self) -> WeeklySummary {
        aggregation::seven_day_summary(self.store.all(), self.today())
    }

    pub fn distribution(&self) -> TypeDistribution {
        aggregation::distribution(self.store.all())
    }

    pub fn export_csv(&self) -> String {
        export::to_csv(self.store.all())
    }

    pub fn export_filename(&self) -> String {
        export::report_filename(self.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{keys, MemoryStore};
    use crate::services::store::SequentialIds;
    use crate::time_utils::FixedClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn tracker_with(store: MemoryStore) -> Tracker {
        Tracker::load(
            StorageAdapter::new(Box::new(store)),
            Box::new(FixedClock::new(today())),
            Box::new(SequentialIds::default()),
        )
    }

    #[test]
    fn test_mutations_are_persisted_immediately() {
        let store = MemoryStore::new();
        let mut tracker = tracker_with(store.clone());

        let added = tracker.add_activity(NewActivity::new(ActivityType::Steps, 3000, today()));
        assert!(added.durable);
        assert!(store.raw(keys::ACTIVITIES).unwrap().contains("\"value\":3000"));

        tracker
            .update_activity(
                &added.value.id,
                NewActivity::new(ActivityType::Steps, 3500, today()),
            )
            .unwrap();
        assert!(store.raw(keys::ACTIVITIES).unwrap().contains("\"value\":3500"));

        tracker.remove_activity(&added.value.id).unwrap();
        assert!(store.raw(keys::ACTIVITIES).unwrap().contains("\"data\":[]"));
    }

    #[test]
    fn test_reload_restores_saved_state() {
        let store = MemoryStore::new();
        let mut tracker = tracker_with(store.clone());
        tracker.add_activity(NewActivity::new(ActivityType::Workout, 1, today()));
        tracker.update_goals(&GoalsUpdate {
            weekly_workouts: Some(2),
            ..Default::default()
        });

        let restored = tracker_with(store);
        assert_eq!(restored.all_activities(), tracker.all_activities());
        assert_eq!(restored.goals().weekly_workouts, 2);
    }

    #[test]
    fn test_reload_replaces_memory_state() {
        let store = MemoryStore::new();
        let mut tracker = tracker_with(store.clone());
        tracker.add_activity(NewActivity::new(ActivityType::Steps, 10, today()));

        store.insert_raw(
            keys::GOALS,
            r#"{"schemaVersion":1,"data":{"dailySteps":7000,"weeklyWorkouts":3,"dailyCalories":400}}"#,
        );
        store.insert_raw(keys::ACTIVITIES, "not json");
        tracker.reload();

        assert!(tracker.all_activities().is_empty());
        assert_eq!(tracker.goals().daily_steps, 7000);
    }

    #[test]
    fn test_replace_goals_persists() {
        let store = MemoryStore::new();
        let mut tracker = tracker_with(store.clone());

        let saved = tracker.replace_goals(Goals {
            daily_steps: 6000,
            weekly_workouts: 3,
            daily_calories: 350,
        });

        assert!(saved.durable);
        assert_eq!(tracker_with(store).goals(), saved.value);
    }

    #[test]
    fn test_failed_save_keeps_change_in_memory() {
        let mut tracker = tracker_with(MemoryStore::with_quota(16));

        let added = tracker.add_activity(NewActivity::new(ActivityType::Calories, 400, today()));

        assert!(!added.durable);
        assert_eq!(tracker.total(Some(ActivityType::Calories), Some(0)), 400);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let mut tracker = tracker_with(store.clone());

        let err = tracker.remove_activity("nope").unwrap_err();
        assert_eq!(err, NotFound("nope".to_string()));
        assert!(store.raw(keys::ACTIVITIES).is_none());
    }

    #[test]
    fn test_activities_sorted_newest_first() {
        let mut tracker = tracker_with(MemoryStore::new());
        let older = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        tracker.add_activity(NewActivity::new(ActivityType::Steps, 1, older));
        tracker.add_activity(NewActivity::new(ActivityType::Steps, 2, today()));
        tracker.add_activity(NewActivity::new(ActivityType::Calories, 3, today()));

        let list = tracker.activities(None, None);
        assert_eq!(
            list.iter().map(|a| a.value).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );

        let steps = tracker.activities(Some(ActivityType::Steps), Some(0));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_day_and_week_helpers() {
        let mut tracker = tracker_with(MemoryStore::new());
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let last_sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        tracker.add_activity(NewActivity::new(ActivityType::Workout, 1, monday));
        tracker.add_activity(NewActivity::new(ActivityType::Workout, 1, last_sunday));
        tracker.add_activity(NewActivity::new(ActivityType::Calories, 120, monday));
        tracker.add_activity(NewActivity::new(ActivityType::Calories, 80, monday));

        assert_eq!(tracker.weekly_workouts(today()), 1);
        assert_eq!(tracker.weekly_workouts(last_sunday), 1);
        assert_eq!(tracker.daily_total(ActivityType::Calories, monday), 200);
        assert_eq!(tracker.daily_total(ActivityType::Calories, today()), 0);
    }

    #[test]
    fn test_export_filename_uses_today() {
        let tracker = tracker_with(MemoryStore::new());
        assert_eq!(tracker.export_filename(), "fittrack-report-2024-01-10.csv");
    }
}
