//! Reset command implementation.

use liftlog_core::WorkoutStore;
use std::error::Error;

/// Deletes all local data after an explicit confirmation flag.
pub fn run(store: &WorkoutStore, yes: bool) -> Result<(), Box<dyn Error>> {
    if !yes {
        return Err("this deletes all local data; pass --yes to confirm".into());
    }
    store.clear_all()?;
    println!("✓ All local data cleared.");
    Ok(())
}
