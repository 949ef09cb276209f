//! Backup file import and export.
//!
//! A backup is a single JSON object holding the full local dataset:
//!
//! ```json
//! {
//!   "exercises": [...],
//!   "workoutLog": [...],
//!   "locations": [...],
//!   "activeDay": 2
//! }
//! ```
//!
//! On import, exercises and the workout log REPLACE local data, locations
//! MERGE into the registry, and the active day is set only when present.

use crate::error::{StoreError, StoreResult};
use crate::migrate;
use crate::records::{Exercise, SetEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The backup file payload. Also reused as the full-export snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    /// All exercise definitions.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// The complete workout log.
    #[serde(default)]
    pub workout_log: Vec<SetEntry>,
    /// The locations registry.
    #[serde(default)]
    pub locations: Vec<String>,
    /// The active training day, if one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_day: Option<u8>,
}

/// Parses backup bytes, normalizing legacy exercise layouts first.
///
/// # Errors
///
/// Returns [`StoreError::InvalidBackup`] when the bytes are not a JSON
/// object of the expected shape.
pub fn parse_backup(bytes: &[u8]) -> StoreResult<BackupFile> {
    let mut value: Value =
        serde_json::from_slice(bytes).map_err(|e| StoreError::invalid_backup(e.to_string()))?;

    let Some(obj) = value.as_object_mut() else {
        return Err(StoreError::invalid_backup("expected a JSON object"));
    };
    if let Some(exercises) = obj.get_mut("exercises") {
        let Some(list) = exercises.as_array_mut() else {
            return Err(StoreError::invalid_backup("\"exercises\" must be an array"));
        };
        for exercise in list {
            migrate::normalize_exercise_value(exercise);
        }
    }

    serde_json::from_value(value).map_err(|e| StoreError::invalid_backup(e.to_string()))
}

/// Reads and parses a backup file from disk.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or
/// [`StoreError::InvalidBackup`] if it cannot be parsed.
pub fn read_backup(path: &Path) -> StoreResult<BackupFile> {
    let bytes = fs::read(path)?;
    parse_backup(&bytes)
}

/// Writes a backup file to disk, pretty-printed.
///
/// The write goes through a temporary file and a rename so an interrupted
/// export never leaves a truncated backup at the target path.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_backup(path: &Path, backup: &BackupFile) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(backup)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ExerciseId, SetId};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_backup() -> BackupFile {
        BackupFile {
            exercises: vec![Exercise {
                id: ExerciseId::from("e1"),
                name: "Bench Press".to_string(),
                primary_muscles: vec!["Chest".to_string()],
                secondary_muscles: vec![],
                locations: vec!["Apartment Gym".to_string()],
                notes: String::new(),
                created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 18, 0, 0).unwrap()),
            }],
            workout_log: vec![SetEntry {
                id: SetId::from("s1"),
                exercise_id: ExerciseId::from("e1"),
                exercise_name: "Bench Press".to_string(),
                day_number: 1,
                set_number: 1,
                weight: 135.0,
                reps: 8,
                timestamp: Utc.with_ymd_and_hms(2024, 2, 6, 1, 0, 0).unwrap(),
            }],
            locations: vec!["Apartment Gym".to_string()],
            active_day: Some(1),
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("liftlog-backup.json");

        let backup = sample_backup();
        write_backup(&path, &backup).unwrap();
        let loaded = read_backup(&path).unwrap();

        assert_eq!(loaded, backup);
        assert!(!dir.path().join("liftlog-backup.tmp").exists());
    }

    #[test]
    fn backup_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_backup()).unwrap();
        assert!(json.get("workoutLog").is_some());
        assert!(json.get("activeDay").is_some());
        assert!(json.get("workout_log").is_none());
    }

    #[test]
    fn active_day_omitted_when_none() {
        let backup = BackupFile::default();
        let json = serde_json::to_value(&backup).unwrap();
        assert!(json.get("activeDay").is_none());
    }

    #[test]
    fn parse_accepts_missing_sections() {
        let backup = parse_backup(br#"{"exercises": []}"#).unwrap();
        assert!(backup.exercises.is_empty());
        assert!(backup.workout_log.is_empty());
        assert!(backup.locations.is_empty());
        assert_eq!(backup.active_day, None);
    }

    #[test]
    fn parse_normalizes_legacy_location_strings() {
        let bytes = br#"{"exercises": [{"id": "e1", "name": "Row", "location": "A|B"}]}"#;
        let backup = parse_backup(bytes).unwrap();
        assert_eq!(backup.exercises[0].locations, vec!["A", "B"]);
    }

    #[test]
    fn parse_rejects_non_objects() {
        let result = parse_backup(b"[1, 2, 3]");
        assert!(matches!(result, Err(StoreError::InvalidBackup { .. })));
    }

    #[test]
    fn parse_rejects_malformed_sections() {
        let result = parse_backup(br#"{"exercises": "nope"}"#);
        assert!(matches!(result, Err(StoreError::InvalidBackup { .. })));

        let result = parse_backup(br#"{"workoutLog": {"not": "a list"}}"#);
        assert!(matches!(result, Err(StoreError::InvalidBackup { .. })));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = read_backup(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
