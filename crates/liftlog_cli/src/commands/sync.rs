//! Sync command implementations.

use crate::http::ReqwestClient;
use liftlog_core::WorkoutStore;
use liftlog_sync_engine::{HttpTransport, Reconciler, SyncConfig};
use serde::Serialize;
use std::error::Error;
use std::sync::Arc;
use tracing::info;

/// Point-in-time sync status, printable as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    pending_changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_sync: Option<String>,
}

fn build(
    store: &Arc<WorkoutStore>,
    url: Option<String>,
) -> Result<Reconciler<HttpTransport<ReqwestClient>>, Box<dyn Error>> {
    let mut config = SyncConfig::new();
    if let Some(url) = url {
        config = config.with_endpoint(url);
    }
    let transport = HttpTransport::from_config(ReqwestClient::new()?, &config);
    Ok(Reconciler::new(Arc::clone(store), transport, config))
}

/// Shows whether sync is configured and what a push would flush.
pub fn status(store: &Arc<WorkoutStore>, format: &str) -> Result<(), Box<dyn Error>> {
    let status = build(store, None)?.status();

    if format == "json" {
        let report = StatusReport {
            configured: status.configured,
            endpoint: status.endpoint,
            pending_changes: status.pending_changes,
            last_sync: status.last_sync.map(|at| at.to_rfc3339()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &status.endpoint {
        Some(endpoint) => println!("Remote:    {endpoint}"),
        None => println!("Remote:    not configured"),
    }
    println!("Pending:   {} queued changes", status.pending_changes);
    match status.last_sync {
        Some(at) => println!("Last sync: {}", super::log::central(at)),
        None => println!("Last sync: never"),
    }
    Ok(())
}

/// Fetches the remote dataset and replaces local data with it.
pub fn pull(store: &Arc<WorkoutStore>, url: Option<String>) -> Result<(), Box<dyn Error>> {
    let reconciler = build(store, url)?;
    info!("Pulling from remote");

    let outcome = reconciler.pull()?;
    println!(
        "✓ Pulled {} exercises, {} sets, {} locations. Local data now matches the remote.",
        outcome.exercises, outcome.sets, outcome.locations
    );
    Ok(())
}

/// Sends the full local snapshot to the remote.
pub fn push(store: &Arc<WorkoutStore>, url: Option<String>) -> Result<(), Box<dyn Error>> {
    let reconciler = build(store, url)?;
    info!("Pushing to remote");

    let outcome = reconciler.push()?;
    println!(
        "✓ Pushed {} exercises and {} sets; flushed {} queued changes.",
        outcome.exercises, outcome.sets, outcome.flushed_changes
    );
    Ok(())
}
