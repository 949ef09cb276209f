//! Workout records and their serialized forms.
//!
//! Everything here serializes as camelCase JSON. That format is shared by
//! the persisted datasets, backup files, and the sync wire payloads, so
//! field renames are a compatibility break.

use crate::ids::{ExerciseId, SetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An exercise definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Opaque unique id, assigned at creation and never changed.
    pub id: ExerciseId,
    /// Display name. Non-empty after trimming.
    pub name: String,
    /// Primary muscle groups. At least one entry.
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    /// Secondary muscle groups.
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Gyms where the exercise is available. Canonical list form; a legacy
    /// single `location` string is normalized into this on load and pull.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Creation time. Records imported from older data may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for creating an exercise. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default)]
pub struct ExerciseDraft {
    /// Display name.
    pub name: String,
    /// Primary muscle groups.
    pub primary_muscles: Vec<String>,
    /// Secondary muscle groups.
    pub secondary_muscles: Vec<String>,
    /// Gyms where the exercise is available.
    pub locations: Vec<String>,
    /// Free-form notes.
    pub notes: String,
}

impl ExerciseDraft {
    /// Creates a draft with the given name and no other fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the primary muscle groups.
    #[must_use]
    pub fn with_primary(mut self, muscles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.primary_muscles = muscles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the secondary muscle groups.
    #[must_use]
    pub fn with_secondary(mut self, muscles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.secondary_muscles = muscles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the locations.
    #[must_use]
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A partial update to an exercise.
///
/// Only fields that are `Some` replace the existing values; everything else
/// is preserved. The id and creation time can never be patched.
#[derive(Debug, Clone, Default)]
pub struct ExercisePatch {
    /// New display name.
    pub name: Option<String>,
    /// New primary muscle groups.
    pub primary_muscles: Option<Vec<String>>,
    /// New secondary muscle groups.
    pub secondary_muscles: Option<Vec<String>>,
    /// New locations.
    pub locations: Option<Vec<String>>,
    /// New notes.
    pub notes: Option<String>,
}

impl ExercisePatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.primary_muscles.is_none()
            && self.secondary_muscles.is_none()
            && self.locations.is_none()
            && self.notes.is_none()
    }

    /// Applies the patch to an exercise in place.
    pub fn apply(&self, exercise: &mut Exercise) {
        if let Some(name) = &self.name {
            exercise.name = name.trim().to_string();
        }
        if let Some(primary) = &self.primary_muscles {
            exercise.primary_muscles = clean_list(primary.clone());
        }
        if let Some(secondary) = &self.secondary_muscles {
            exercise.secondary_muscles = clean_list(secondary.clone());
        }
        if let Some(locations) = &self.locations {
            exercise.locations = clean_list(locations.clone());
        }
        if let Some(notes) = &self.notes {
            exercise.notes = notes.trim().to_string();
        }
    }
}

/// One logged set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    /// Opaque unique id.
    pub id: SetId,
    /// The exercise this set belongs to. Purely logical: the exercise may
    /// have been deleted since, and the entry stays valid history.
    pub exercise_id: ExerciseId,
    /// Exercise name as it read when the set was logged.
    #[serde(default)]
    pub exercise_name: String,
    /// Training-day slot 1-5 that was active when logging, 0 if none.
    #[serde(default)]
    pub day_number: u8,
    /// 1-based ordinal within (exercise, Central-Time day).
    #[serde(default)]
    pub set_number: u32,
    /// Weight used. Zero and negative are valid (bodyweight, assisted).
    pub weight: f64,
    /// Repetitions performed. At least 1.
    pub reps: u32,
    /// When the set was logged.
    pub timestamp: DateTime<Utc>,
}

/// Input for logging a set. The store assigns everything else.
#[derive(Debug, Clone)]
pub struct SetDraft {
    /// The exercise being performed.
    pub exercise_id: ExerciseId,
    /// Weight used.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: u32,
    /// Explicit log time; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
}

impl SetDraft {
    /// Creates a draft logged at the current time.
    #[must_use]
    pub fn new(exercise_id: ExerciseId, weight: f64, reps: u32) -> Self {
        Self {
            exercise_id,
            weight,
            reps,
            timestamp: None,
        }
    }

    /// Pins the draft to an explicit timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A local change recorded since the last successful push.
///
/// The queue is an audit trail, not a replay log: pushes always send the
/// full local snapshot, and a successful push clears the queue wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedChange {
    /// What changed.
    #[serde(flatten)]
    pub action: QueuedAction,
    /// When the change was made locally.
    pub queued_at: DateTime<Utc>,
}

/// The set of local changes that can be queued.
///
/// Closed enum: an unknown action cannot be represented, and decoding a
/// queue containing one fails loudly instead of guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum QueuedAction {
    /// An exercise was created. Carries the full record.
    AddExercise(Exercise),
    /// An exercise was updated. Carries the full merged record.
    UpdateExercise(Exercise),
    /// An exercise was deleted.
    DeleteExercise {
        /// Id of the removed exercise.
        id: ExerciseId,
    },
    /// A set was logged. Carries the full entry.
    LogSet(SetEntry),
    /// A set was deleted.
    DeleteSet {
        /// Id of the removed set.
        id: SetId,
    },
}

impl QueuedAction {
    /// The wire name of this action, as it appears in the `action` field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddExercise(_) => "addExercise",
            Self::UpdateExercise(_) => "updateExercise",
            Self::DeleteExercise { .. } => "deleteExercise",
            Self::LogSet(_) => "logSet",
            Self::DeleteSet { .. } => "deleteSet",
        }
    }
}

/// Trims entries and drops the ones that end up empty.
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
