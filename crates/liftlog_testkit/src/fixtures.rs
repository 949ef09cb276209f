//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up test stores
//! and common training scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};
use liftlog_core::{Exercise, ExerciseDraft, SetDraft, SetEntry, WorkoutStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A test store with automatic cleanup.
pub struct TestStore {
    /// The store instance.
    pub store: Arc<WorkoutStore>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a new in-memory test store.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(WorkoutStore::open_in_memory().expect("Failed to open store")),
            _temp_dir: None,
        }
    }

    /// Creates a new file-backed test store.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = WorkoutStore::open_at(&temp_dir.path().join("liftlog"))
            .expect("Failed to open file store");
        Self {
            store: Arc::new(store),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the data directory if file-backed, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|d| d.path().join("liftlog"))
    }
}

impl std::ops::Deref for TestStore {
    type Target = WorkoutStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary in-memory store.
///
/// # Example
///
/// ```rust,ignore
/// use liftlog_testkit::with_temp_store;
///
/// #[test]
/// fn my_test() {
///     with_temp_store(|store| {
///         store.add_exercise(ExerciseDraft::new("Bench Press")).unwrap();
///         // ... test operations
///     });
/// }
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&WorkoutStore) -> R,
{
    let test_store = TestStore::memory();
    f(&test_store.store)
}

/// Runs a test with a temporary file-backed store.
pub fn with_file_store<F, R>(f: F) -> R
where
    F: FnOnce(&WorkoutStore, &std::path::Path) -> R,
{
    let test_store = TestStore::file();
    let path = test_store.path().expect("File store should have a path");
    f(&test_store.store, &path)
}

/// A midday Central Time instant, `days` days after a fixed anchor.
///
/// Midday keeps generated sets well away from the day boundary, so tests
/// that group by training day stay stable.
pub fn training_time(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 5, 18, 0, 0).unwrap() + Duration::days(days)
}

/// A draft for a typical barbell press.
pub fn bench_press() -> ExerciseDraft {
    ExerciseDraft::new("Bench Press")
        .with_primary(["Chest"])
        .with_secondary(["Triceps", "Front Delts"])
        .with_locations(["Apartment Gym", "EOS Fitness"])
        .with_notes("Pause at the chest")
}

/// A draft for a typical lower-body lift.
pub fn barbell_squat() -> ExerciseDraft {
    ExerciseDraft::new("Barbell Squat")
        .with_primary(["Quads", "Glutes"])
        .with_locations(["EOS Fitness"])
}

/// A draft for a bodyweight pull.
pub fn pull_up() -> ExerciseDraft {
    ExerciseDraft::new("Pull Up").with_primary(["Back"])
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a store with `exercise_count` exercises and `sets_each` sets
    /// logged per exercise, all on the same training day.
    pub fn populated_store(exercise_count: usize, sets_each: usize) -> TestStore {
        let test_store = TestStore::memory();

        for i in 0..exercise_count {
            let exercise = test_store
                .add_exercise(ExerciseDraft::new(format!("Exercise {i}")).with_primary(["Chest"]))
                .expect("Failed to add exercise");
            for s in 0..sets_each {
                let draft = SetDraft::new(exercise.id.clone(), 100.0 + s as f64 * 5.0, 8)
                    .at(training_time(0) + Duration::minutes(s as i64 * 3));
                test_store.log_set(draft).expect("Failed to log set");
            }
        }

        test_store
    }

    /// Creates a store holding a few days of bench work, one set per day,
    /// newest last. Returns the store, the exercise, and the sets.
    pub fn training_week(days: usize) -> (TestStore, Exercise, Vec<SetEntry>) {
        let test_store = TestStore::memory();
        let exercise = test_store
            .add_exercise(bench_press())
            .expect("Failed to add exercise");

        let mut sets = Vec::with_capacity(days);
        for d in 0..days {
            let draft = SetDraft::new(exercise.id.clone(), 135.0 + d as f64 * 5.0, 5)
                .at(training_time(d as i64));
            sets.push(test_store.log_set(draft).expect("Failed to log set"));
        }

        (test_store, exercise, sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_starts_seeded() {
        let test_store = TestStore::memory();
        assert!(test_store.exercises().is_empty());
        assert!(!test_store.locations().is_empty());
    }

    #[test]
    fn file_store_has_a_path() {
        let test_store = TestStore::file();
        assert!(test_store.path().is_some());
        test_store
            .add_exercise(bench_press())
            .expect("Failed to add exercise");
    }

    #[test]
    fn populated_scenario_counts_match() {
        let test_store = scenarios::populated_store(3, 2);
        assert_eq!(test_store.exercises().len(), 3);
        assert_eq!(test_store.workout_log().len(), 6);
    }

    #[test]
    fn training_week_spans_days() {
        let (test_store, exercise, sets) = scenarios::training_week(4);
        assert_eq!(sets.len(), 4);
        // One set per day, so every set is set number one.
        assert!(sets.iter().all(|s| s.set_number == 1));
        assert_eq!(test_store.last_workout_sets(&exercise.id).len(), 1);
    }
}
