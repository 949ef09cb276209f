//! # liftlog Storage
//!
//! Storage backend trait and implementations for liftlog.
//!
//! This crate provides the lowest-level persistence abstraction for liftlog.
//! Backends are **flat key/value stores** - each dataset lives under one
//! string key and is read and replaced wholesale. Backends do not interpret
//! the bytes they store.
//!
//! ## Design Principles
//!
//! - One key per dataset (`exercises`, `workout_log`, `settings`, ...)
//! - Replacement writes are atomic; a failed write never destroys the
//!   previous value
//! - Must be `Send + Sync` for shared access
//! - The store layer owns all serialization
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - One JSON file per key in a data directory
//!
//! ## Example
//!
//! ```rust
//! use liftlog_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.put("active_day", b"2").unwrap();
//! assert_eq!(backend.get("active_day").unwrap(), Some(b"2".to_vec()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
