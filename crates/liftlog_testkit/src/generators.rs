//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random workout data
//! that maintains required invariants.

use chrono::{DateTime, TimeZone, Utc};
use liftlog_core::{ExerciseDraft, ExerciseId, SetDraft};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Muscle groups the generators draw from.
pub const MUSCLE_GROUPS: [&str; 10] = [
    "Chest",
    "Back",
    "Quads",
    "Hamstrings",
    "Glutes",
    "Biceps",
    "Triceps",
    "Shoulders",
    "Calves",
    "Core",
];

/// Strategy for generating valid exercise names.
pub fn exercise_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,2}")
        .expect("Invalid regex")
}

/// Strategy for picking one muscle group.
pub fn muscle_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(MUSCLE_GROUPS.to_vec()).prop_map(str::to_string)
}

/// Strategy for a non-empty list of distinct muscle groups.
pub fn muscle_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(MUSCLE_GROUPS.to_vec(), 1..4)
        .prop_map(|muscles| muscles.into_iter().map(str::to_string).collect())
}

/// Strategy for a single gym location name.
///
/// Names never contain `|`, which the wire format reserves for joining
/// the legacy single-column form.
pub fn location_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?").expect("Invalid regex")
}

/// Strategy for a list of gym locations.
pub fn location_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(location_strategy(), 0..3)
}

/// Strategy for generating exercise drafts the store accepts.
pub fn exercise_draft_strategy() -> impl Strategy<Value = ExerciseDraft> {
    (
        exercise_name_strategy(),
        muscle_list_strategy(),
        prop::collection::vec(muscle_strategy(), 0..3),
        location_list_strategy(),
        prop::option::of("[a-z ]{0,30}"),
    )
        .prop_map(|(name, primary, secondary, locations, notes)| {
            let mut draft = ExerciseDraft::new(name)
                .with_primary(primary)
                .with_secondary(secondary)
                .with_locations(locations);
            if let Some(notes) = notes {
                draft = draft.with_notes(notes);
            }
            draft
        })
}

/// Strategy for plate-loaded weights in 2.5 increments, zero included
/// for bodyweight work.
pub fn weight_strategy() -> impl Strategy<Value = f64> {
    (0u32..240).prop_map(|quarters| f64::from(quarters) * 2.5)
}

/// Strategy for repetition counts.
pub fn reps_strategy() -> impl Strategy<Value = u32> {
    1u32..=30
}

/// Strategy for log timestamps across a few years.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    (start.timestamp()..end.timestamp())
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Strategy for set drafts against a known exercise.
pub fn set_draft_strategy(exercise_id: ExerciseId) -> impl Strategy<Value = SetDraft> {
    (weight_strategy(), reps_strategy(), timestamp_strategy()).prop_map(
        move |(weight, reps, timestamp)| {
            SetDraft::new(exercise_id.clone(), weight, reps).at(timestamp)
        },
    )
}

/// Strategy for exercise rows as older clients wrote them: a single
/// pipe-joined `location` column and no `locations` array.
pub fn legacy_exercise_row_strategy() -> impl Strategy<Value = Value> {
    (
        "[a-z0-9]{8}",
        exercise_name_strategy(),
        muscle_list_strategy(),
        prop::collection::vec(location_strategy(), 0..3),
    )
        .prop_map(|(id, name, primary, locations)| {
            json!({
                "id": id,
                "name": name,
                "primaryMuscles": primary,
                "location": locations.join("|"),
            })
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::WorkoutStore;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_drafts_are_accepted(draft in exercise_draft_strategy()) {
            let store = WorkoutStore::open_in_memory().unwrap();
            let exercise = store.add_exercise(draft.clone()).unwrap();
            prop_assert_eq!(exercise.name, draft.name.trim());
            prop_assert!(!exercise.primary_muscles.is_empty());
        }

        #[test]
        fn generated_sets_are_accepted(
            weight in weight_strategy(),
            reps in reps_strategy(),
            timestamp in timestamp_strategy(),
        ) {
            let store = WorkoutStore::open_in_memory().unwrap();
            let exercise = store
                .add_exercise(ExerciseDraft::new("Press").with_primary(["Chest"]))
                .unwrap();
            let entry = store
                .log_set(SetDraft::new(exercise.id, weight, reps).at(timestamp))
                .unwrap();
            prop_assert!(entry.set_number >= 1);
            prop_assert_eq!(entry.timestamp, timestamp);
        }

        #[test]
        fn locations_never_contain_the_join_character(list in location_list_strategy()) {
            prop_assert!(list.iter().all(|l| !l.contains('|')));
        }

        #[test]
        fn legacy_rows_carry_a_single_location_column(row in legacy_exercise_row_strategy()) {
            prop_assert!(row.get("location").is_some());
            prop_assert!(row.get("locations").is_none());
        }
    }
}
