//! Workout log command implementations.

use chrono::{DateTime, NaiveDate, Utc};
use liftlog_core::dates;
use liftlog_core::{SetDraft, SetEntry, SetId, WorkoutStore};
use std::error::Error;

/// Formats a UTC instant in the workout timezone.
pub(crate) fn central(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&dates::WORKOUT_TZ)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// One-line rendering of a set inside a single-exercise listing.
pub(crate) fn set_line(set: &SetEntry) -> String {
    let day = if set.day_number == 0 {
        String::new()
    } else {
        format!("  day {}", set.day_number)
    };
    format!(
        "{}  {} x {}  set {}{}",
        central(set.timestamp),
        set.weight,
        set.reps,
        set.set_number,
        day
    )
}

fn history_line(set: &SetEntry) -> String {
    format!(
        "{:<14} {}  {:<24} {} x {}  set {}",
        set.id,
        central(set.timestamp),
        set.exercise_name,
        set.weight,
        set.reps,
        set.set_number
    )
}

/// Logs a set against an exercise.
pub fn add(
    store: &WorkoutStore,
    selector: &str,
    weight: f64,
    reps: u32,
    at: Option<DateTime<Utc>>,
) -> Result<(), Box<dyn Error>> {
    let exercise = super::exercise::resolve(store, selector)?;

    let mut draft = SetDraft::new(exercise.id.clone(), weight, reps);
    if let Some(at) = at {
        draft = draft.at(at);
    }
    let entry = store.log_set(draft)?;

    let day = if entry.day_number == 0 {
        String::new()
    } else {
        format!(", day {}", entry.day_number)
    };
    println!(
        "✓ {}: {} x {} (set {} for {}{})",
        entry.exercise_name,
        entry.weight,
        entry.reps,
        entry.set_number,
        dates::central_date(entry.timestamp),
        day
    );
    Ok(())
}

/// Prints logged sets, newest first.
pub fn history(
    store: &WorkoutStore,
    selector: Option<&str>,
    date: Option<NaiveDate>,
    limit: usize,
    format: &str,
) -> Result<(), Box<dyn Error>> {
    let mut sets = match (selector, date) {
        (Some(selector), None) => store.history(&super::exercise::resolve(store, selector)?.id),
        (None, Some(date)) => store.workouts_by_date(date),
        (Some(selector), Some(date)) => {
            let id = super::exercise::resolve(store, selector)?.id;
            let mut sets = store.workouts_by_date(date);
            sets.retain(|s| s.exercise_id == id);
            sets
        }
        (None, None) => {
            let mut sets = store.workout_log();
            sets.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            sets
        }
    };
    sets.truncate(limit);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    }

    if sets.is_empty() {
        println!("No sets recorded.");
        return Ok(());
    }
    for set in &sets {
        println!("{}", history_line(set));
    }
    Ok(())
}

/// Shows the most recent workout before a date (defaults to today).
pub fn last(
    store: &WorkoutStore,
    selector: &str,
    before: Option<NaiveDate>,
) -> Result<(), Box<dyn Error>> {
    let exercise = super::exercise::resolve(store, selector)?;
    let cutoff = before.unwrap_or_else(dates::today_central);

    let sets = store.last_workout_before(&exercise.id, cutoff);
    match sets.first() {
        None => println!("No workout for {} before {}.", exercise.name, cutoff),
        Some(first) => {
            println!("{} on {}:", exercise.name, dates::central_date(first.timestamp));
            for set in &sets {
                println!("  {}", set_line(set));
            }
        }
    }
    Ok(())
}

/// Shows today's sets for an exercise.
pub fn today(store: &WorkoutStore, selector: &str) -> Result<(), Box<dyn Error>> {
    let exercise = super::exercise::resolve(store, selector)?;

    let sets = store.today_sets(&exercise.id);
    if sets.is_empty() {
        println!("No sets for {} today.", exercise.name);
        return Ok(());
    }
    println!("{} today:", exercise.name);
    for set in &sets {
        println!("  {}", set_line(set));
    }
    Ok(())
}

/// Deletes a logged set by id.
pub fn delete(store: &WorkoutStore, id: &str) -> Result<(), Box<dyn Error>> {
    if store.delete_set(&SetId::from(id))? {
        println!("✓ Deleted set {id}");
        Ok(())
    } else {
        Err(format!("no set with id \"{id}\"").into())
    }
}
