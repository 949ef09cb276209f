//! LiftLog CLI
//!
//! Command-line workout tracker: a local-first store of exercises and
//! logged sets, with explicit pull/push sync against a remote endpoint.
//!
//! # Commands
//!
//! - `exercise` - Manage exercise definitions
//! - `log` - Log sets and browse workout history
//! - `day` - Show or select the active training day
//! - `location` - Manage the gym locations registry
//! - `remote` - Configure the sync endpoint
//! - `sync` - Pull or push the full dataset
//! - `export` / `import` - Write and read backup files
//! - `reset` - Delete all local data

mod commands;
mod http;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use liftlog_core::WorkoutStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// LiftLog command-line workout tracker.
#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the data directory
    #[arg(global = true, short, long, default_value = "liftlog_data")]
    data_dir: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage exercise definitions
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Log sets and browse workout history
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Show or select the active training day
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },

    /// Manage the gym locations registry
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },

    /// Configure the remote sync endpoint
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Reconcile local data with the remote
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },

    /// Export the full dataset to a backup file
    Export {
        /// Backup file to write
        file: PathBuf,
    },

    /// Import a backup file, replacing exercises and history
    Import {
        /// Backup file to read
        file: PathBuf,
    },

    /// Delete all local data and start fresh
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add a new exercise
    Add {
        /// Display name
        name: String,

        /// Primary muscle group (repeatable)
        #[arg(short, long = "primary", required = true)]
        primary: Vec<String>,

        /// Secondary muscle group (repeatable)
        #[arg(short, long = "secondary")]
        secondary: Vec<String>,

        /// Gym where the exercise is available (repeatable)
        #[arg(short, long = "location")]
        locations: Vec<String>,

        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List all exercises
    List {
        /// Only exercises available at this gym
        #[arg(short, long)]
        location: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show one exercise with its recent training context
    Show {
        /// Exercise id or name
        exercise: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Update fields of an exercise
    Update {
        /// Exercise id or name
        exercise: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// Replacement primary muscle groups (repeatable)
        #[arg(long = "primary")]
        primary: Option<Vec<String>>,

        /// Replacement secondary muscle groups (repeatable)
        #[arg(long = "secondary")]
        secondary: Option<Vec<String>>,

        /// Replacement gym list (repeatable)
        #[arg(long = "location")]
        locations: Option<Vec<String>>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an exercise (its logged sets stay in history)
    Delete {
        /// Exercise id or name
        exercise: String,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// Log a set
    #[command(allow_negative_numbers = true)]
    Add {
        /// Exercise id or name
        exercise: String,

        /// Weight used (zero for bodyweight, negative for assisted)
        weight: f64,

        /// Repetitions performed
        reps: u32,

        /// Log time as RFC 3339, defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Browse logged sets, newest first
    History {
        /// Limit to one exercise (id or name)
        #[arg(short, long)]
        exercise: Option<String>,

        /// Limit to one date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Maximum sets to print
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the most recent earlier workout for an exercise
    Last {
        /// Exercise id or name
        exercise: String,

        /// Compare before this date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        before: Option<NaiveDate>,
    },

    /// Show today's sets for an exercise
    Today {
        /// Exercise id or name
        exercise: String,
    },

    /// Delete a logged set by id
    Delete {
        /// Set id (shown by `log history`)
        set: String,
    },
}

#[derive(Subcommand)]
enum DayCommands {
    /// Show the active training day
    Show,

    /// Select the active training day (1-5)
    Set {
        /// Day number
        day: u8,
    },

    /// Clear the active day
    Clear,
}

#[derive(Subcommand)]
enum LocationCommands {
    /// List known gym locations
    List,

    /// Add a location to the registry
    Add {
        /// Location name
        name: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Show the configured endpoint
    Show,

    /// Store the endpoint URL
    Set {
        /// Endpoint URL
        url: String,
    },

    /// Clear the endpoint
    Clear,
}

#[derive(Subcommand)]
enum SyncCommands {
    /// Show sync configuration and pending work
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Fetch the remote dataset and replace local data with it
    Pull {
        /// One-off endpoint override
        #[arg(long)]
        url: Option<String>,
    },

    /// Send the full local snapshot to the remote
    Push {
        /// One-off endpoint override
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(WorkoutStore::open_at(&cli.data_dir)?);

    match cli.command {
        Commands::Exercise { command } => match command {
            ExerciseCommands::Add {
                name,
                primary,
                secondary,
                locations,
                notes,
            } => commands::exercise::add(&store, name, primary, secondary, locations, notes)?,
            ExerciseCommands::List { location, format } => {
                commands::exercise::list(&store, location.as_deref(), &format)?;
            }
            ExerciseCommands::Show { exercise, format } => {
                commands::exercise::show(&store, &exercise, &format)?;
            }
            ExerciseCommands::Update {
                exercise,
                name,
                primary,
                secondary,
                locations,
                notes,
            } => {
                commands::exercise::update(
                    &store, &exercise, name, primary, secondary, locations, notes,
                )?;
            }
            ExerciseCommands::Delete { exercise } => {
                commands::exercise::delete(&store, &exercise)?;
            }
        },
        Commands::Log { command } => match command {
            LogCommands::Add {
                exercise,
                weight,
                reps,
                at,
            } => commands::log::add(&store, &exercise, weight, reps, at)?,
            LogCommands::History {
                exercise,
                date,
                limit,
                format,
            } => commands::log::history(&store, exercise.as_deref(), date, limit, &format)?,
            LogCommands::Last { exercise, before } => {
                commands::log::last(&store, &exercise, before)?;
            }
            LogCommands::Today { exercise } => commands::log::today(&store, &exercise)?,
            LogCommands::Delete { set } => commands::log::delete(&store, &set)?,
        },
        Commands::Day { command } => match command {
            DayCommands::Show => commands::day::show(&store),
            DayCommands::Set { day } => commands::day::set(&store, day)?,
            DayCommands::Clear => commands::day::clear(&store)?,
        },
        Commands::Location { command } => match command {
            LocationCommands::List => commands::location::list(&store),
            LocationCommands::Add { name } => commands::location::add(&store, &name)?,
        },
        Commands::Remote { command } => match command {
            RemoteCommands::Show => commands::remote::show(&store),
            RemoteCommands::Set { url } => commands::remote::set(&store, url)?,
            RemoteCommands::Clear => commands::remote::clear(&store)?,
        },
        Commands::Sync { command } => match command {
            SyncCommands::Status { format } => commands::sync::status(&store, &format)?,
            SyncCommands::Pull { url } => commands::sync::pull(&store, url)?,
            SyncCommands::Push { url } => commands::sync::push(&store, url)?,
        },
        Commands::Export { file } => commands::backup::export(&store, &file)?,
        Commands::Import { file } => commands::backup::import(&store, &file)?,
        Commands::Reset { yes } => commands::reset::run(&store, yes)?,
    }

    Ok(())
}
