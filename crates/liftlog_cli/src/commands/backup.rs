//! Backup export and import commands.

use liftlog_core::{read_backup, write_backup, WorkoutStore};
use std::error::Error;
use std::path::Path;
use tracing::info;

/// Exports the full dataset to a backup file.
pub fn export(store: &WorkoutStore, file: &Path) -> Result<(), Box<dyn Error>> {
    info!("Exporting to {:?}", file);

    let backup = store.export_all();
    write_backup(file, &backup)?;
    println!(
        "✓ Exported {} exercises and {} sets to {}",
        backup.exercises.len(),
        backup.workout_log.len(),
        file.display()
    );
    Ok(())
}

/// Imports a backup file, replacing exercises and history.
pub fn import(store: &WorkoutStore, file: &Path) -> Result<(), Box<dyn Error>> {
    info!("Importing from {:?}", file);

    let backup = read_backup(file)?;
    let exercises = backup.exercises.len();
    let sets = backup.workout_log.len();
    store.import_backup(backup)?;
    println!(
        "✓ Imported {exercises} exercises and {sets} sets. Locations were merged into the registry."
    );
    Ok(())
}
