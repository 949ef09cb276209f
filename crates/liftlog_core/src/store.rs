//! The workout store.

use crate::backup::BackupFile;
use crate::dates;
use crate::error::{StoreError, StoreResult};
use crate::ids::{ExerciseId, SetId};
use crate::migrate::{self, RawDatasets};
use crate::records::{
    clean_list, Exercise, ExerciseDraft, ExercisePatch, QueuedAction, QueuedChange, SetDraft,
    SetEntry,
};
use chrono::{DateTime, NaiveDate, Utc};
use liftlog_storage::{FileBackend, InMemoryBackend, StorageBackend, StorageError};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Storage keys, one per dataset.
mod keys {
    pub const EXERCISES: &str = "exercises";
    pub const WORKOUT_LOG: &str = "workout_log";
    pub const ACTIVE_DAY: &str = "active_day";
    pub const LOCATIONS: &str = "locations";
    pub const SYNC_QUEUE: &str = "sync_queue";
    pub const LAST_SYNC: &str = "last_sync";
    pub const SETTINGS: &str = "settings";
    pub const SCHEMA_VERSION: &str = "schema_version";
}

/// Locations seeded into a fresh store.
pub const DEFAULT_LOCATIONS: [&str; 2] = ["Apartment Gym", "EOS Fitness"];

/// Device-local settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The remote sync endpoint, if one has been configured.
    #[serde(default)]
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    exercises: Vec<Exercise>,
    workout_log: Vec<SetEntry>,
    locations: Vec<String>,
    active_day: Option<u8>,
    sync_queue: Vec<QueuedChange>,
    last_sync: Option<DateTime<Utc>>,
    settings: Settings,
}

impl StoreState {
    fn first_run() -> Self {
        Self {
            locations: DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// The local workout store.
///
/// `WorkoutStore` is the single entry point for all local data: exercise
/// definitions, the workout log, the active training day, the locations
/// registry, the sync queue, and device settings. All reads and writes are
/// synchronous and local.
///
/// Every mutation persists the affected dataset BEFORE updating the
/// in-memory state, so a storage failure surfaces as an error and the
/// store keeps serving the previous data.
///
/// # Opening a Store
///
/// ```rust
/// use liftlog_core::{ExerciseDraft, WorkoutStore};
///
/// let store = WorkoutStore::open_in_memory().unwrap();
/// let bench = store
///     .add_exercise(ExerciseDraft::new("Bench Press").with_primary(["Chest"]))
///     .unwrap();
/// assert_eq!(store.exercise(&bench.id).unwrap().name, "Bench Press");
/// ```
///
/// For persistent data use [`WorkoutStore::open_at`], which stores each
/// dataset as a JSON file in a data directory.
pub struct WorkoutStore {
    backend: Box<dyn StorageBackend>,
    state: RwLock<StoreState>,
}

impl WorkoutStore {
    /// Opens a store over the given backend, migrating stored data to the
    /// current schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be read, migrated, or
    /// decoded.
    pub fn open(backend: Box<dyn StorageBackend>) -> StoreResult<Self> {
        let store = Self {
            backend,
            state: RwLock::new(StoreState::default()),
        };
        store.load()?;
        Ok(store)
    }

    /// Opens a store backed by a data directory on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the stored
    /// data cannot be loaded.
    pub fn open_at(path: &Path) -> StoreResult<Self> {
        Self::open(Box::new(FileBackend::open(path)?))
    }

    /// Opens an ephemeral in-memory store. Intended for tests.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`WorkoutStore::open`].
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(Box::new(InMemoryBackend::new()))
    }

    fn load(&self) -> StoreResult<()> {
        if self.backend.keys()?.is_empty() {
            let state = StoreState::first_run();
            self.persist(keys::SCHEMA_VERSION, &migrate::SCHEMA_VERSION)?;
            self.persist(keys::LOCATIONS, &state.locations)?;
            *self.state.write() = state;
            debug!("initialized fresh store");
            return Ok(());
        }

        let version: u64 = self.read_or(keys::SCHEMA_VERSION, 1)?;
        let mut raw = RawDatasets {
            exercises: self.read_or(keys::EXERCISES, Vec::new())?,
            workout_log: self.read_or(keys::WORKOUT_LOG, Vec::new())?,
            locations: self.read_or(keys::LOCATIONS, Vec::new())?,
        };
        let migrated = migrate::run_pending(version, &mut raw)?;

        let state = StoreState {
            exercises: decode_rows(keys::EXERCISES, raw.exercises)?,
            workout_log: decode_rows(keys::WORKOUT_LOG, raw.workout_log)?,
            locations: raw.locations,
            active_day: self.read_or(keys::ACTIVE_DAY, None)?,
            sync_queue: self.read_or(keys::SYNC_QUEUE, Vec::new())?,
            last_sync: self.read_or(keys::LAST_SYNC, None)?,
            settings: self.read_or(keys::SETTINGS, Settings::default())?,
        };

        if migrated != version {
            self.persist(keys::EXERCISES, &state.exercises)?;
            self.persist(keys::WORKOUT_LOG, &state.workout_log)?;
            self.persist(keys::LOCATIONS, &state.locations)?;
            self.persist(keys::SCHEMA_VERSION, &migrated)?;
            info!(from = version, to = migrated, "migrated stored data");
        }

        debug!(
            exercises = state.exercises.len(),
            sets = state.workout_log.len(),
            queued = state.sync_queue.len(),
            "loaded store"
        );
        *self.state.write() = state;
        Ok(())
    }

    // ---- exercises ----

    /// Returns all exercise definitions in insertion order.
    #[must_use]
    pub fn exercises(&self) -> Vec<Exercise> {
        self.state.read().exercises.clone()
    }

    /// Looks up one exercise by id.
    #[must_use]
    pub fn exercise(&self, id: &ExerciseId) -> Option<Exercise> {
        self.state.read().exercises.iter().find(|e| &e.id == id).cloned()
    }

    /// Creates an exercise from a draft.
    ///
    /// Assigns a fresh id and creation time, validates the record, and
    /// queues the creation for the next push.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the name is empty or no
    /// primary muscle group is given; nothing is persisted or queued.
    pub fn add_exercise(&self, draft: ExerciseDraft) -> StoreResult<Exercise> {
        let now = Utc::now();
        let exercise = Exercise {
            id: ExerciseId::generate(),
            name: draft.name.trim().to_string(),
            primary_muscles: clean_list(draft.primary_muscles),
            secondary_muscles: clean_list(draft.secondary_muscles),
            locations: clean_list(draft.locations),
            notes: draft.notes.trim().to_string(),
            created_at: Some(now),
        };
        validate_exercise(&exercise)?;

        let mut state = self.state.write();
        let mut exercises = state.exercises.clone();
        exercises.push(exercise.clone());
        self.persist(keys::EXERCISES, &exercises)?;
        state.exercises = exercises;
        self.enqueue(&mut state, QueuedAction::AddExercise(exercise.clone()), now)?;

        debug!(id = %exercise.id, name = %exercise.name, "added exercise");
        Ok(exercise)
    }

    /// Applies a partial update to an exercise.
    ///
    /// Only fields present in the patch replace existing values; the id and
    /// creation time are never touched. The full merged record is queued
    /// for the next push.
    ///
    /// Returns `Ok(None)` when no exercise has that id; that is a soft
    /// no-op, not an error, and nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the merged record would be
    /// invalid; the stored record is left unchanged.
    pub fn update_exercise(
        &self,
        id: &ExerciseId,
        patch: ExercisePatch,
    ) -> StoreResult<Option<Exercise>> {
        let mut state = self.state.write();
        let Some(pos) = state.exercises.iter().position(|e| &e.id == id) else {
            return Ok(None);
        };

        let mut merged = state.exercises[pos].clone();
        patch.apply(&mut merged);
        validate_exercise(&merged)?;

        let mut exercises = state.exercises.clone();
        exercises[pos] = merged.clone();
        self.persist(keys::EXERCISES, &exercises)?;
        state.exercises = exercises;
        self.enqueue(
            &mut state,
            QueuedAction::UpdateExercise(merged.clone()),
            Utc::now(),
        )?;

        debug!(id = %merged.id, "updated exercise");
        Ok(Some(merged))
    }

    /// Deletes an exercise definition.
    ///
    /// Log entries referencing the exercise are NOT removed; orphaned
    /// history stays valid. Returns `false` when no exercise has that id
    /// (soft no-op, nothing queued).
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn delete_exercise(&self, id: &ExerciseId) -> StoreResult<bool> {
        let mut state = self.state.write();
        if !state.exercises.iter().any(|e| &e.id == id) {
            return Ok(false);
        }

        let exercises: Vec<Exercise> = state
            .exercises
            .iter()
            .filter(|e| &e.id != id)
            .cloned()
            .collect();
        self.persist(keys::EXERCISES, &exercises)?;
        state.exercises = exercises;
        self.enqueue(
            &mut state,
            QueuedAction::DeleteExercise { id: id.clone() },
            Utc::now(),
        )?;

        debug!(%id, "deleted exercise");
        Ok(true)
    }

    // ---- workout log ----

    /// Returns the complete workout log in insertion order.
    #[must_use]
    pub fn workout_log(&self) -> Vec<SetEntry> {
        self.state.read().workout_log.clone()
    }

    /// Logs a set.
    ///
    /// The store stamps the entry: fresh id, the draft's timestamp (or
    /// now), the exercise name as it currently reads (empty if the
    /// exercise is unknown - the reference may dangle), the active day (0
    /// if none), and a 1-based set number within (exercise, Central-Time
    /// day). The entry is queued for the next push.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for non-finite weight or zero
    /// reps. Zero and negative weights are valid.
    pub fn log_set(&self, draft: SetDraft) -> StoreResult<SetEntry> {
        validate_set(draft.weight, draft.reps)?;

        let mut state = self.state.write();
        let timestamp = draft.timestamp.unwrap_or_else(Utc::now);
        let day = dates::central_date(timestamp);
        let set_number = 1 + state
            .workout_log
            .iter()
            .filter(|s| {
                s.exercise_id == draft.exercise_id && dates::central_date(s.timestamp) == day
            })
            .count() as u32;
        let exercise_name = state
            .exercises
            .iter()
            .find(|e| e.id == draft.exercise_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();

        let entry = SetEntry {
            id: SetId::generate(),
            exercise_id: draft.exercise_id,
            exercise_name,
            day_number: state.active_day.unwrap_or(0),
            set_number,
            weight: draft.weight,
            reps: draft.reps,
            timestamp,
        };

        let mut log = state.workout_log.clone();
        log.push(entry.clone());
        self.persist(keys::WORKOUT_LOG, &log)?;
        state.workout_log = log;
        self.enqueue(&mut state, QueuedAction::LogSet(entry.clone()), timestamp)?;

        debug!(id = %entry.id, set = entry.set_number, "logged set");
        Ok(entry)
    }

    /// Deletes a logged set by id.
    ///
    /// Returns `false` when no set has that id (soft no-op, nothing
    /// queued).
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn delete_set(&self, id: &SetId) -> StoreResult<bool> {
        let mut state = self.state.write();
        if !state.workout_log.iter().any(|s| &s.id == id) {
            return Ok(false);
        }

        let log: Vec<SetEntry> = state
            .workout_log
            .iter()
            .filter(|s| &s.id != id)
            .cloned()
            .collect();
        self.persist(keys::WORKOUT_LOG, &log)?;
        state.workout_log = log;
        self.enqueue(&mut state, QueuedAction::DeleteSet { id: id.clone() }, Utc::now())?;

        debug!(%id, "deleted set");
        Ok(true)
    }

    /// Returns every set for an exercise, newest first.
    #[must_use]
    pub fn history(&self, exercise_id: &ExerciseId) -> Vec<SetEntry> {
        let mut sets = self.sets_for(exercise_id);
        sets.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sets
    }

    /// Returns the sets from the most recent Central-Time day with any
    /// activity for the exercise, in set order. Today counts.
    #[must_use]
    pub fn last_workout_sets(&self, exercise_id: &ExerciseId) -> Vec<SetEntry> {
        latest_day(self.sets_for(exercise_id))
    }

    /// Returns the sets from the most recent Central-Time day strictly
    /// before `date`. This is the "last workout" a user compares against
    /// while training today.
    #[must_use]
    pub fn last_workout_before(&self, exercise_id: &ExerciseId, date: NaiveDate) -> Vec<SetEntry> {
        let mut sets = self.sets_for(exercise_id);
        sets.retain(|s| dates::central_date(s.timestamp) < date);
        latest_day(sets)
    }

    /// Returns the exercise's sets logged today (Central Time), in order.
    #[must_use]
    pub fn today_sets(&self, exercise_id: &ExerciseId) -> Vec<SetEntry> {
        let today = dates::today_central();
        let mut sets = self.sets_for(exercise_id);
        sets.retain(|s| dates::central_date(s.timestamp) == today);
        sort_by_set(&mut sets);
        sets
    }

    /// Returns every set logged on a Central-Time date, across exercises,
    /// in timestamp order.
    #[must_use]
    pub fn workouts_by_date(&self, date: NaiveDate) -> Vec<SetEntry> {
        let state = self.state.read();
        let mut sets: Vec<SetEntry> = state
            .workout_log
            .iter()
            .filter(|s| dates::central_date(s.timestamp) == date)
            .cloned()
            .collect();
        sets.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        sets
    }

    fn sets_for(&self, exercise_id: &ExerciseId) -> Vec<SetEntry> {
        self.state
            .read()
            .workout_log
            .iter()
            .filter(|s| &s.exercise_id == exercise_id)
            .cloned()
            .collect()
    }

    // ---- active day and locations ----

    /// Returns the active training day (1-5), if one is selected.
    #[must_use]
    pub fn active_day(&self) -> Option<u8> {
        self.state.read().active_day
    }

    /// Selects or clears the active training day.
    ///
    /// Device-local preference; never queued for sync.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] unless the day is in 1..=5.
    pub fn set_active_day(&self, day: Option<u8>) -> StoreResult<()> {
        if let Some(day) = day {
            validate_day(day)?;
        }
        let mut state = self.state.write();
        self.persist(keys::ACTIVE_DAY, &day)?;
        state.active_day = day;
        Ok(())
    }

    /// Returns the locations registry.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.state.read().locations.clone()
    }

    /// Appends a location to the registry.
    ///
    /// Returns `false` if the location is already present (exact match).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a blank name.
    pub fn add_location(&self, name: &str) -> StoreResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("location name must not be empty"));
        }

        let mut state = self.state.write();
        if state.locations.iter().any(|l| l == name) {
            return Ok(false);
        }
        let mut locations = state.locations.clone();
        locations.push(name.to_string());
        self.persist(keys::LOCATIONS, &locations)?;
        state.locations = locations;
        Ok(true)
    }

    /// Merges locations into the registry, keeping existing entries and
    /// appending unseen ones in the order given.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn merge_locations(&self, incoming: Vec<String>) -> StoreResult<()> {
        let mut state = self.state.write();
        self.merge_locations_locked(&mut state, incoming)
    }

    fn merge_locations_locked(
        &self,
        state: &mut StoreState,
        incoming: Vec<String>,
    ) -> StoreResult<()> {
        let mut locations = state.locations.clone();
        for location in clean_list(incoming) {
            if !locations.iter().any(|l| *l == location) {
                locations.push(location);
            }
        }
        if locations != state.locations {
            self.persist(keys::LOCATIONS, &locations)?;
            state.locations = locations;
        }
        Ok(())
    }

    // ---- import / export ----

    /// Replaces all exercise definitions. Bypasses validation and the sync
    /// queue; used by pull and backup import.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn import_exercises(&self, exercises: Vec<Exercise>) -> StoreResult<()> {
        let mut state = self.state.write();
        self.replace_exercises_locked(&mut state, exercises)
    }

    /// Replaces the whole workout log. Bypasses validation and the sync
    /// queue; used by pull and backup import.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn import_workout_log(&self, log: Vec<SetEntry>) -> StoreResult<()> {
        let mut state = self.state.write();
        self.replace_workout_log_locked(&mut state, log)
    }

    fn replace_exercises_locked(
        &self,
        state: &mut StoreState,
        exercises: Vec<Exercise>,
    ) -> StoreResult<()> {
        self.persist(keys::EXERCISES, &exercises)?;
        state.exercises = exercises;
        Ok(())
    }

    fn replace_workout_log_locked(
        &self,
        state: &mut StoreState,
        log: Vec<SetEntry>,
    ) -> StoreResult<()> {
        self.persist(keys::WORKOUT_LOG, &log)?;
        state.workout_log = log;
        Ok(())
    }

    /// Replaces exercises, workout log, AND locations with remote copies.
    ///
    /// This is the destructive half of a pull: remote data wins wholesale,
    /// even when the remote collections are empty. The sync queue is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails; on error the datasets
    /// persisted so far keep their new values (the replacement is not
    /// transactional).
    pub fn apply_remote_snapshot(
        &self,
        exercises: Vec<Exercise>,
        log: Vec<SetEntry>,
        locations: Vec<String>,
    ) -> StoreResult<()> {
        let mut state = self.state.write();
        self.replace_exercises_locked(&mut state, exercises)?;
        self.replace_workout_log_locked(&mut state, log)?;
        self.persist(keys::LOCATIONS, &locations)?;
        state.locations = locations;
        Ok(())
    }

    /// Exports the full local dataset as a backup snapshot.
    #[must_use]
    pub fn export_all(&self) -> BackupFile {
        let state = self.state.read();
        BackupFile {
            exercises: state.exercises.clone(),
            workout_log: state.workout_log.clone(),
            locations: state.locations.clone(),
            active_day: state.active_day,
        }
    }

    /// Imports a backup: exercises and workout log replace local data,
    /// locations merge into the registry, and the active day is set only
    /// when the backup carries one. Nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an out-of-range active day
    /// (checked before anything is applied), or a storage error if
    /// persisting fails.
    pub fn import_backup(&self, backup: BackupFile) -> StoreResult<()> {
        if let Some(day) = backup.active_day {
            validate_day(day)?;
        }

        let mut state = self.state.write();
        self.replace_exercises_locked(&mut state, backup.exercises)?;
        self.replace_workout_log_locked(&mut state, backup.workout_log)?;
        self.merge_locations_locked(&mut state, backup.locations)?;
        if let Some(day) = backup.active_day {
            self.persist(keys::ACTIVE_DAY, &Some(day))?;
            state.active_day = Some(day);
        }
        info!(
            exercises = state.exercises.len(),
            sets = state.workout_log.len(),
            "imported backup"
        );
        Ok(())
    }

    // ---- sync bookkeeping ----

    /// Returns the queued changes, oldest first.
    #[must_use]
    pub fn sync_queue(&self) -> Vec<QueuedChange> {
        self.state.read().sync_queue.clone()
    }

    /// Returns the number of queued changes.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.state.read().sync_queue.len()
    }

    /// Clears the sync queue. Called after a successful full push.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn clear_sync_queue(&self) -> StoreResult<()> {
        let mut state = self.state.write();
        let empty: Vec<QueuedChange> = Vec::new();
        self.persist(keys::SYNC_QUEUE, &empty)?;
        state.sync_queue = empty;
        Ok(())
    }

    /// Returns when the last successful sync finished.
    #[must_use]
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_sync
    }

    /// Records a successful sync time.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn set_last_sync(&self, at: DateTime<Utc>) -> StoreResult<()> {
        let mut state = self.state.write();
        self.persist(keys::LAST_SYNC, &Some(at))?;
        state.last_sync = Some(at);
        Ok(())
    }

    /// Returns the configured remote endpoint, if any.
    #[must_use]
    pub fn remote_url(&self) -> Option<String> {
        self.state.read().settings.remote_url.clone()
    }

    /// Sets or clears the remote endpoint. A blank URL clears it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn set_remote_url(&self, url: Option<String>) -> StoreResult<()> {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        let mut state = self.state.write();
        let settings = Settings { remote_url: url };
        self.persist(keys::SETTINGS, &settings)?;
        state.settings = settings;
        Ok(())
    }

    /// Wipes everything back to first-run defaults: no exercises, no log,
    /// seeded locations, no active day, empty queue, no settings.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the wipe or re-initialization fails.
    pub fn clear_all(&self) -> StoreResult<()> {
        let mut state = self.state.write();
        self.backend.clear()?;
        let fresh = StoreState::first_run();
        self.persist(keys::SCHEMA_VERSION, &migrate::SCHEMA_VERSION)?;
        self.persist(keys::LOCATIONS, &fresh.locations)?;
        *state = fresh;
        info!("cleared all data");
        Ok(())
    }

    // ---- persistence plumbing ----

    fn enqueue(
        &self,
        state: &mut StoreState,
        action: QueuedAction,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut queue = state.sync_queue.clone();
        queue.push(QueuedChange {
            action,
            queued_at: at,
        });
        self.persist(keys::SYNC_QUEUE, &queue)?;
        state.sync_queue = queue;
        Ok(())
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.put(key, &bytes)?;
        Ok(())
    }

    fn read_or<T: DeserializeOwned>(&self, key: &str, default: T) -> StoreResult<T> {
        match self.backend.get(key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::corrupted(key, e.to_string()).into()),
            None => Ok(default),
        }
    }
}

fn decode_rows<T: DeserializeOwned>(key: &str, rows: Vec<Value>) -> StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| StorageError::corrupted(key, e.to_string()).into())
        })
        .collect()
}

fn latest_day(mut sets: Vec<SetEntry>) -> Vec<SetEntry> {
    let Some(latest) = sets.iter().map(|s| dates::central_date(s.timestamp)).max() else {
        return Vec::new();
    };
    sets.retain(|s| dates::central_date(s.timestamp) == latest);
    sort_by_set(&mut sets);
    sets
}

fn sort_by_set(sets: &mut [SetEntry]) {
    sets.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then(a.set_number.cmp(&b.set_number))
    });
}

fn validate_exercise(exercise: &Exercise) -> StoreResult<()> {
    if exercise.name.trim().is_empty() {
        return Err(StoreError::validation("exercise name must not be empty"));
    }
    if exercise.primary_muscles.is_empty() {
        return Err(StoreError::validation(
            "at least one primary muscle group is required",
        ));
    }
    Ok(())
}

fn validate_set(weight: f64, reps: u32) -> StoreResult<()> {
    if !weight.is_finite() {
        return Err(StoreError::validation("weight must be a finite number"));
    }
    if reps == 0 {
        return Err(StoreError::validation("reps must be at least 1"));
    }
    Ok(())
}

fn validate_day(day: u8) -> StoreResult<()> {
    if (1..=5).contains(&day) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "active day must be between 1 and 5, got {day}"
        )))
    }
}
