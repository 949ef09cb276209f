//! Locations registry commands.

use liftlog_core::WorkoutStore;
use std::error::Error;

/// Lists known gym locations.
pub fn list(store: &WorkoutStore) {
    let locations = store.locations();
    if locations.is_empty() {
        println!("No locations recorded.");
        return;
    }
    for location in &locations {
        println!("{location}");
    }
}

/// Adds a location to the registry.
pub fn add(store: &WorkoutStore, name: &str) -> Result<(), Box<dyn Error>> {
    if store.add_location(name)? {
        println!("✓ Added {name}");
    } else {
        println!("{name} is already in the registry.");
    }
    Ok(())
}
