//! # liftlog_sync_protocol
//!
//! Wire messages for liftlog's single-endpoint sync protocol.
//!
//! Every sync call is a JSON POST with an `action` field:
//!
//! - `getAll` fetches the complete remote dataset
//! - `replaceAll` overwrites the remote dataset with a full snapshot
//!
//! Replies are JSON objects; a non-empty `error` field marks a failure
//! regardless of transport status. This is a pure protocol crate with no
//! I/O.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod messages;

pub use error::{ProtocolError, ProtocolResult};
pub use messages::{
    AckResponse, GetAllResponse, RemoteSnapshot, ReplaceAllPayload, SyncRequest, WireExercise,
};
