//! Active training day commands.

use liftlog_core::WorkoutStore;
use std::error::Error;

/// Shows the active training day.
pub fn show(store: &WorkoutStore) {
    match store.active_day() {
        Some(day) => println!("Active day: {day}"),
        None => println!("No active day; new sets log with day 0."),
    }
}

/// Selects the active training day.
pub fn set(store: &WorkoutStore, day: u8) -> Result<(), Box<dyn Error>> {
    store.set_active_day(Some(day))?;
    println!("✓ Active day set to {day}");
    Ok(())
}

/// Clears the active day.
pub fn clear(store: &WorkoutStore) -> Result<(), Box<dyn Error>> {
    store.set_active_day(None)?;
    println!("✓ Active day cleared; new sets log with day 0.");
    Ok(())
}
