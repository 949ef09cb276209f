//! # liftlog_core
//!
//! The local workout store: exercise definitions, the workout log, training
//! days, locations, backups, and the sync bookkeeping that the reconciler
//! builds on.
//!
//! ## Design
//!
//! - **Local first.** Every operation works against local storage and
//!   returns synchronously. Talking to a remote is the sync engine's job.
//! - **Write-through.** Mutations persist through a
//!   [`liftlog_storage::StorageBackend`] before the in-memory state is
//!   updated, so a failed write never leaves memory ahead of disk.
//! - **Audit queue.** Each mutation appends to a sync queue. The queue is
//!   evidence that a push is due; pushes send full snapshots and clear it.
//!
//! ## Example
//!
//! ```rust
//! use liftlog_core::{ExerciseDraft, SetDraft, WorkoutStore};
//!
//! let store = WorkoutStore::open_in_memory()?;
//! let squat = store.add_exercise(
//!     ExerciseDraft::new("Squat").with_primary(["Quads", "Glutes"]),
//! )?;
//! store.set_active_day(Some(1))?;
//! let set = store.log_set(SetDraft::new(squat.id.clone(), 225.0, 5))?;
//! assert_eq!(set.set_number, 1);
//! assert_eq!(set.day_number, 1);
//! # Ok::<(), liftlog_core::StoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backup;
pub mod dates;
pub mod error;
pub mod ids;
pub mod migrate;
pub mod records;
pub mod store;

pub use backup::{parse_backup, read_backup, write_backup, BackupFile};
pub use error::{StoreError, StoreResult};
pub use ids::{ExerciseId, SetId};
pub use records::{
    Exercise, ExerciseDraft, ExercisePatch, QueuedAction, QueuedChange, SetDraft, SetEntry,
};
pub use store::{Settings, WorkoutStore, DEFAULT_LOCATIONS};
