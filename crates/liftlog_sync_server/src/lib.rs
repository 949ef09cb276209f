//! # liftlog_sync_server
//!
//! A reference implementation of the sync endpoint liftlog talks to.
//!
//! The hosted remote is a spreadsheet-backed script with one POST route;
//! this crate provides [`RemoteServer`], an in-process equivalent used by
//! the sync engine's tests and by anyone who wants to run the endpoint
//! locally. It stores the pushed rows verbatim and answers `getAll` and
//! `replaceAll` exactly like the hosted script, including error-in-body
//! reporting.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod server;

pub use server::RemoteServer;
