//! Exercise command implementations.

use liftlog_core::dates;
use liftlog_core::{Exercise, ExerciseDraft, ExercisePatch, WorkoutStore};
use std::error::Error;

/// Resolves a user-supplied selector to an exercise.
///
/// Ids match exactly; otherwise the selector is treated as a
/// case-insensitive name and must match a single exercise.
pub fn resolve(store: &WorkoutStore, selector: &str) -> Result<Exercise, Box<dyn Error>> {
    let exercises = store.exercises();
    if let Some(found) = exercises.iter().find(|e| e.id.as_str() == selector) {
        return Ok(found.clone());
    }

    let lowered = selector.to_lowercase();
    let mut named = exercises.iter().filter(|e| e.name.to_lowercase() == lowered);
    match (named.next(), named.next()) {
        (Some(found), None) => Ok(found.clone()),
        (Some(_), Some(_)) => {
            Err(format!("several exercises are named \"{selector}\"; use the id").into())
        }
        (None, _) => Err(format!("no exercise matches \"{selector}\"").into()),
    }
}

/// Adds a new exercise.
pub fn add(
    store: &WorkoutStore,
    name: String,
    primary: Vec<String>,
    secondary: Vec<String>,
    locations: Vec<String>,
    notes: String,
) -> Result<(), Box<dyn Error>> {
    let draft = ExerciseDraft::new(name)
        .with_primary(primary)
        .with_secondary(secondary)
        .with_locations(locations)
        .with_notes(notes);
    let exercise = store.add_exercise(draft)?;

    println!("✓ Added {} [{}]", exercise.name, exercise.id);
    if !exercise.locations.is_empty() {
        println!("  Locations: {}", exercise.locations.join(", "));
    }
    Ok(())
}

/// Lists exercises, optionally only those available at one gym.
pub fn list(
    store: &WorkoutStore,
    location: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn Error>> {
    let mut exercises = store.exercises();
    if let Some(location) = location {
        exercises.retain(|e| e.locations.iter().any(|l| l.eq_ignore_ascii_case(location)));
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&exercises)?);
        return Ok(());
    }

    if exercises.is_empty() {
        match location {
            Some(location) => println!("No exercises available at {location}."),
            None => println!("No exercises yet. Add one with `liftlog exercise add`."),
        }
        return Ok(());
    }

    println!("{:<15} {:<24} {:<20} LOCATIONS", "ID", "NAME", "PRIMARY");
    for exercise in &exercises {
        println!(
            "{:<15} {:<24} {:<20} {}",
            exercise.id,
            exercise.name,
            exercise.primary_muscles.join(", "),
            exercise.locations.join(", ")
        );
    }
    Ok(())
}

/// Shows one exercise with its recent training context.
pub fn show(store: &WorkoutStore, selector: &str, format: &str) -> Result<(), Box<dyn Error>> {
    let exercise = resolve(store, selector)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&exercise)?);
        return Ok(());
    }

    println!("{} [{}]", exercise.name, exercise.id);
    println!("  Primary:   {}", exercise.primary_muscles.join(", "));
    if !exercise.secondary_muscles.is_empty() {
        println!("  Secondary: {}", exercise.secondary_muscles.join(", "));
    }
    if !exercise.locations.is_empty() {
        println!("  Locations: {}", exercise.locations.join(", "));
    }
    if !exercise.notes.is_empty() {
        println!("  Notes:     {}", exercise.notes);
    }
    if let Some(created) = exercise.created_at {
        println!("  Created:   {}", super::log::central(created));
    }

    let last = store.last_workout_before(&exercise.id, dates::today_central());
    if let Some(first) = last.first() {
        println!();
        println!("Last workout ({}):", dates::central_date(first.timestamp));
        for set in &last {
            println!("  {}", super::log::set_line(set));
        }
    }

    let today = store.today_sets(&exercise.id);
    if !today.is_empty() {
        println!();
        println!("Today:");
        for set in &today {
            println!("  {}", super::log::set_line(set));
        }
    }
    Ok(())
}

/// Replaces the given fields of an exercise.
pub fn update(
    store: &WorkoutStore,
    selector: &str,
    name: Option<String>,
    primary: Option<Vec<String>>,
    secondary: Option<Vec<String>>,
    locations: Option<Vec<String>>,
    notes: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let exercise = resolve(store, selector)?;

    let patch = ExercisePatch {
        name,
        primary_muscles: primary,
        secondary_muscles: secondary,
        locations,
        notes,
    };
    if patch.is_empty() {
        return Err("nothing to update; pass at least one field".into());
    }

    match store.update_exercise(&exercise.id, patch)? {
        Some(updated) => println!("✓ Updated {} [{}]", updated.name, updated.id),
        None => return Err(format!("no exercise matches \"{selector}\"").into()),
    }
    Ok(())
}

/// Deletes an exercise. Its logged sets stay in history.
pub fn delete(store: &WorkoutStore, selector: &str) -> Result<(), Box<dyn Error>> {
    let exercise = resolve(store, selector)?;
    if store.delete_exercise(&exercise.id)? {
        println!(
            "✓ Deleted {}; its logged sets remain in history.",
            exercise.name
        );
    }
    Ok(())
}
