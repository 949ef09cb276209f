//! Versioned schema migration for stored datasets.
//!
//! Migrations are:
//! - **Load-time**: they run once when a store is opened, before the raw
//!   JSON is decoded into typed records
//! - **Forward-only**: there is no automatic rollback; keep a backup
//! - **Contiguous**: each migration bumps the version by exactly one
//!
//! The current layout is version 2. Version 1 is the layout written by the
//! original web client, where an exercise could carry a single `location`
//! string (possibly pipe-joined) instead of the `locations` list.

use crate::error::{StoreError, StoreResult};
use serde_json::Value;
use tracing::info;

/// The schema version this build reads and writes.
pub const SCHEMA_VERSION: u64 = 2;

/// Raw, undecoded view of the migratable datasets.
#[derive(Debug, Default)]
pub struct RawDatasets {
    /// Exercise objects as stored.
    pub exercises: Vec<Value>,
    /// Workout log entries as stored.
    pub workout_log: Vec<Value>,
    /// The locations registry.
    pub locations: Vec<String>,
}

/// A single schema migration step.
pub trait Migration: Send + Sync {
    /// The version this migration upgrades the layout TO.
    ///
    /// Versions are unique and contiguous starting from 2 (version 1 is
    /// the oldest layout in the wild).
    fn version(&self) -> u64;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Optional description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Rewrites the raw datasets in place.
    fn up(&self, raw: &mut RawDatasets) -> StoreResult<()>;
}

/// All known migrations, oldest first.
#[must_use]
pub fn registry() -> Vec<Box<dyn Migration>> {
    vec![Box::new(LegacyLocationFields)]
}

/// Applies every migration newer than `current`, returning the new version.
///
/// # Errors
///
/// Fails if the version chain has a gap, if `current` is newer than this
/// build understands, or if a migration itself fails. On failure nothing
/// has been persisted; the caller discards the raw datasets.
pub fn run_pending(current: u64, raw: &mut RawDatasets) -> StoreResult<u64> {
    if current > SCHEMA_VERSION {
        return Err(StoreError::migration_failed(format!(
            "data is schema version {current}, but this build only understands up to {SCHEMA_VERSION}"
        )));
    }

    let mut version = current;
    for migration in registry() {
        if migration.version() <= version {
            continue;
        }
        if migration.version() != version + 1 {
            return Err(StoreError::migration_failed(format!(
                "no migration path from version {version} to {}",
                migration.version()
            )));
        }
        migration.up(raw)?;
        version = migration.version();
        info!(version, name = migration.name(), "applied schema migration");
    }

    if version != SCHEMA_VERSION {
        return Err(StoreError::migration_failed(format!(
            "migrations ended at version {version}, expected {SCHEMA_VERSION}"
        )));
    }
    Ok(version)
}

/// Splits a legacy pipe-joined location string into the canonical list.
///
/// `"Apartment Gym|EOS Fitness"` becomes two entries; a plain string
/// becomes one; blanks are dropped.
#[must_use]
pub fn split_legacy_location(location: &str) -> Vec<String> {
    location
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Normalizes one raw exercise object to the canonical layout.
///
/// If the object has no usable `locations` list but does carry a legacy
/// `location` string, the string is split into `locations`. The legacy
/// field is removed either way. Used both by the v1 to v2 migration and
/// when decoding exercises pulled from the remote, so local and remote
/// legacy data normalize identically.
pub fn normalize_exercise_value(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };

    let has_locations = obj
        .get("locations")
        .and_then(Value::as_array)
        .map(|a| !a.is_empty())
        .unwrap_or(false);

    if !has_locations {
        if let Some(legacy) = obj.get("location").and_then(Value::as_str) {
            let split = split_legacy_location(legacy);
            if !split.is_empty() {
                obj.insert("locations".to_string(), Value::from(split));
            }
        }
    }
    obj.remove("location");
}

/// v1 to v2: exercises carry `locations` lists instead of a single
/// `location` string.
struct LegacyLocationFields;

impl Migration for LegacyLocationFields {
    fn version(&self) -> u64 {
        2
    }

    fn name(&self) -> &str {
        "legacy_location_fields"
    }

    fn description(&self) -> Option<&str> {
        Some("split legacy pipe-joined location strings into locations lists")
    }

    fn up(&self, raw: &mut RawDatasets) -> StoreResult<()> {
        for exercise in &mut raw.exercises {
            normalize_exercise_value(exercise);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_handles_plain_and_joined_strings() {
        assert_eq!(split_legacy_location("EOS Fitness"), vec!["EOS Fitness"]);
        assert_eq!(
            split_legacy_location("Apartment Gym|EOS Fitness"),
            vec!["Apartment Gym", "EOS Fitness"]
        );
        assert_eq!(split_legacy_location(" A | B "), vec!["A", "B"]);
        assert!(split_legacy_location("").is_empty());
        assert!(split_legacy_location(" | ").is_empty());
    }

    #[test]
    fn normalize_splits_legacy_location() {
        let mut value = json!({"id": "e1", "name": "Row", "location": "A|B"});
        normalize_exercise_value(&mut value);
        assert_eq!(value["locations"], json!(["A", "B"]));
        assert!(value.get("location").is_none());
    }

    #[test]
    fn normalize_prefers_existing_locations_list() {
        let mut value = json!({
            "id": "e1",
            "name": "Row",
            "locations": ["Home"],
            "location": "A|B"
        });
        normalize_exercise_value(&mut value);
        assert_eq!(value["locations"], json!(["Home"]));
        assert!(value.get("location").is_none());
    }

    #[test]
    fn normalize_fills_empty_locations_list_from_legacy() {
        let mut value = json!({"id": "e1", "name": "Row", "locations": [], "location": "A"});
        normalize_exercise_value(&mut value);
        assert_eq!(value["locations"], json!(["A"]));
    }

    #[test]
    fn normalize_without_legacy_is_noop() {
        let mut value = json!({"id": "e1", "name": "Row", "locations": ["Home"]});
        let before = value.clone();
        normalize_exercise_value(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn run_pending_upgrades_v1_to_current() {
        let mut raw = RawDatasets {
            exercises: vec![json!({"id": "e1", "name": "Row", "location": "A|B"})],
            ..RawDatasets::default()
        };
        let version = run_pending(1, &mut raw).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        assert_eq!(raw.exercises[0]["locations"], json!(["A", "B"]));
    }

    #[test]
    fn run_pending_at_current_version_is_noop() {
        let mut raw = RawDatasets::default();
        let version = run_pending(SCHEMA_VERSION, &mut raw).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn run_pending_rejects_future_versions() {
        let mut raw = RawDatasets::default();
        let result = run_pending(SCHEMA_VERSION + 1, &mut raw);
        assert!(matches!(result, Err(StoreError::MigrationFailed { .. })));
    }

    #[test]
    fn registry_versions_are_contiguous_from_two() {
        let versions: Vec<u64> = registry().iter().map(|m| m.version()).collect();
        let expected: Vec<u64> = (2..=SCHEMA_VERSION).collect();
        assert_eq!(versions, expected);
    }
}
