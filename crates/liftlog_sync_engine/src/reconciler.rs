//! The sync reconciler.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::SyncTransport;
use chrono::{DateTime, Utc};
use liftlog_core::WorkoutStore;
use liftlog_sync_protocol::ReplaceAllPayload;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, warn};

/// Which half of a sync cycle the reconciler is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No sync is running.
    Idle,
    /// A pull is replacing local data with the remote dataset.
    Pulling,
    /// A push is replacing the remote dataset with local data.
    Pushing,
}

impl SyncPhase {
    /// Returns `true` while a pull or push is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Counters kept across a reconciler's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Pulls that completed successfully.
    pub pulls_completed: u64,
    /// Pushes that completed successfully.
    pub pushes_completed: u64,
    /// Exercises received across all pulls.
    pub exercises_pulled: u64,
    /// Sets received across all pulls.
    pub sets_pulled: u64,
    /// Queued changes flushed by successful pushes.
    pub changes_flushed: u64,
    /// Text of the most recent failure, cleared by the next success.
    pub last_error: Option<String>,
}

/// What a successful pull brought in.
#[derive(Debug, Clone, Copy)]
pub struct PullOutcome {
    /// Exercises now in the local store.
    pub exercises: usize,
    /// Sets now in the local store.
    pub sets: usize,
    /// Locations now in the local registry.
    pub locations: usize,
}

/// What a successful push sent out.
#[derive(Debug, Clone, Copy)]
pub struct PushOutcome {
    /// Exercises in the pushed snapshot.
    pub exercises: usize,
    /// Sets in the pushed snapshot.
    pub sets: usize,
    /// Queued changes flushed by the push.
    pub flushed_changes: usize,
}

/// A point-in-time view of the reconciler and its store.
#[derive(Debug, Clone)]
pub struct SyncStatus {
    /// Whether an endpoint is configured.
    pub configured: bool,
    /// The endpoint sync calls would use right now.
    pub endpoint: Option<String>,
    /// Current phase.
    pub phase: SyncPhase,
    /// Queued changes awaiting a push.
    pub pending_changes: usize,
    /// When the last successful sync finished.
    pub last_sync: Option<DateTime<Utc>>,
}

/// Reconciles the local store against the remote dataset.
///
/// The protocol has exactly two moves, both whole-dataset:
///
/// - [`Reconciler::pull`] fetches the remote dataset and replaces local
///   exercises, workout log, and locations with it, even when the remote
///   is empty. The sync queue is not touched.
/// - [`Reconciler::push`] sends the full local snapshot. Only after the
///   remote acknowledges does it clear the sync queue and stamp the
///   last-sync marker.
///
/// There is no merging and no automatic retry; syncs run only when
/// explicitly requested, and at most one at a time. A second call while
/// one is in flight fails with [`SyncError::InFlight`].
pub struct Reconciler<T: SyncTransport> {
    store: Arc<WorkoutStore>,
    transport: T,
    config: SyncConfig,
    phase: Mutex<SyncPhase>,
    stats: RwLock<SyncStats>,
}

impl<T: SyncTransport> Reconciler<T> {
    /// Creates a reconciler over a store and transport.
    pub fn new(store: Arc<WorkoutStore>, transport: T, config: SyncConfig) -> Self {
        Self {
            store,
            transport,
            config,
            phase: Mutex::new(SyncPhase::Idle),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        *self.phase.lock()
    }

    /// Returns a copy of the lifetime counters.
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Returns `true` when sync calls have an endpoint to talk to.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some()
    }

    /// Returns a point-in-time status view.
    #[must_use]
    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            configured: self.is_configured(),
            endpoint: self.endpoint(),
            phase: self.phase(),
            pending_changes: self.store.queue_len(),
            last_sync: self.store.last_sync(),
        }
    }

    /// Pulls the remote dataset and replaces local data with it.
    ///
    /// Remote data wins wholesale: exercises, workout log, and locations
    /// are all overwritten, even when the remote is empty. The sync queue
    /// survives, so unpushed work stays visible. On success the last-sync
    /// marker is stamped.
    ///
    /// # Errors
    ///
    /// [`SyncError::NotConfigured`] without an endpoint,
    /// [`SyncError::InFlight`] while another sync runs,
    /// [`SyncError::RemoteUnavailable`] or [`SyncError::RemoteProtocol`]
    /// for transport and reply failures. On any error local data is left
    /// exactly as it was.
    pub fn pull(&self) -> SyncResult<PullOutcome> {
        let result = self.pull_inner();
        self.record_failure(result.as_ref().err(), "pull");
        result
    }

    fn pull_inner(&self) -> SyncResult<PullOutcome> {
        let endpoint = self.endpoint().ok_or(SyncError::NotConfigured)?;
        let _guard = self.begin(SyncPhase::Pulling)?;

        info!(%endpoint, "pulling remote dataset");
        let reply = self.transport.get_all(&endpoint)?;
        let snapshot = reply.into_snapshot()?;
        if snapshot.is_empty() {
            warn!("remote is empty; local data will be cleared");
        }

        let outcome = PullOutcome {
            exercises: snapshot.exercises.len(),
            sets: snapshot.workout_log.len(),
            locations: snapshot.locations.len(),
        };
        self.store.apply_remote_snapshot(
            snapshot.exercises,
            snapshot.workout_log,
            snapshot.locations,
        )?;
        self.store.set_last_sync(Utc::now())?;

        let mut stats = self.stats.write();
        stats.pulls_completed += 1;
        stats.exercises_pulled += outcome.exercises as u64;
        stats.sets_pulled += outcome.sets as u64;
        stats.last_error = None;
        drop(stats);

        info!(
            exercises = outcome.exercises,
            sets = outcome.sets,
            locations = outcome.locations,
            "pull complete"
        );
        Ok(outcome)
    }

    /// Pushes the full local snapshot to the remote.
    ///
    /// The payload is the complete local dataset regardless of what is
    /// queued; the queue only tells how much unpushed work existed. Only
    /// after the remote acknowledges are the queue cleared and the
    /// last-sync marker stamped.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Reconciler::pull`]. On any error the queue and
    /// the last-sync marker are left untouched, and the push as a whole
    /// is safe to retry.
    pub fn push(&self) -> SyncResult<PushOutcome> {
        let result = self.push_inner();
        self.record_failure(result.as_ref().err(), "push");
        result
    }

    fn push_inner(&self) -> SyncResult<PushOutcome> {
        let endpoint = self.endpoint().ok_or(SyncError::NotConfigured)?;
        let _guard = self.begin(SyncPhase::Pushing)?;

        let pending = self.store.queue_len();
        let payload = ReplaceAllPayload::from_snapshot(self.store.export_all());
        let outcome = PushOutcome {
            exercises: payload.exercises.len(),
            sets: payload.workout_log.len(),
            flushed_changes: pending,
        };

        info!(
            %endpoint,
            exercises = outcome.exercises,
            sets = outcome.sets,
            pending,
            "pushing full snapshot"
        );
        let ack = self.transport.replace_all(&endpoint, payload)?;
        ack.into_result().map_err(SyncError::from)?;

        self.store.clear_sync_queue()?;
        self.store.set_last_sync(Utc::now())?;

        let mut stats = self.stats.write();
        stats.pushes_completed += 1;
        stats.changes_flushed += pending as u64;
        stats.last_error = None;
        drop(stats);

        info!(flushed = pending, "push complete");
        Ok(outcome)
    }

    fn endpoint(&self) -> Option<String> {
        self.config
            .endpoint
            .clone()
            .or_else(|| self.store.remote_url())
    }

    fn begin(&self, phase: SyncPhase) -> SyncResult<PhaseGuard<'_>> {
        let mut current = self.phase.lock();
        if current.is_active() {
            return Err(SyncError::InFlight);
        }
        *current = phase;
        Ok(PhaseGuard { phase: &self.phase })
    }

    fn record_failure(&self, error: Option<&SyncError>, op: &str) {
        if let Some(err) = error {
            if !matches!(err, SyncError::InFlight) {
                self.stats.write().last_error = Some(err.to_string());
                warn!(%err, "{op} failed");
            }
        }
    }
}

/// Resets the phase to idle when a sync ends, however it ends.
struct PhaseGuard<'a> {
    phase: &'a Mutex<SyncPhase>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        *self.phase.lock() = SyncPhase::Idle;
    }
}
