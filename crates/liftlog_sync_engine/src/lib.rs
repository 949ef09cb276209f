//! # LiftLog Sync Engine
//!
//! Explicit synchronization between a local workout store and a remote
//! spreadsheet-backed dataset.
//!
//! This crate provides:
//! - Pull and push reconciliation over a two-action wire protocol
//! - Single in-flight guard (at most one sync at a time)
//! - HTTP transport abstraction with a loopback client for tests
//! - Lifetime sync counters and a point-in-time status view
//!
//! ## Architecture
//!
//! The engine implements a **last-write-wins, whole-dataset** model with
//! two independent moves:
//! 1. [`Reconciler::pull`] fetches the remote dataset and replaces local
//!    data with it (remote wins)
//! 2. [`Reconciler::push`] sends the full local snapshot and, once
//!    acknowledged, clears the sync queue (local wins)
//!
//! Nothing is merged and nothing runs on a timer; each direction is a
//! deliberate user action.
//!
//! ## Key Invariants
//!
//! - Pull never touches the sync queue
//! - Push clears the queue and stamps the last-sync marker only after the
//!   remote acknowledges
//! - A failed sync leaves local data, queue, and marker exactly as found
//! - No automatic retry; errors report whether retrying makes sense

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod reconciler;
mod transport;

pub use config::{SyncConfig, DEFAULT_TIMEOUT};
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpTransport, LoopbackClient, LoopbackServer};
pub use reconciler::{PullOutcome, PushOutcome, Reconciler, SyncPhase, SyncStats, SyncStatus};
pub use transport::{MockTransport, SyncTransport};
