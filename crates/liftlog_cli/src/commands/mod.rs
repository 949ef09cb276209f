//! CLI command implementations.

pub mod backup;
pub mod day;
pub mod exercise;
pub mod location;
pub mod log;
pub mod remote;
pub mod reset;
pub mod sync;
