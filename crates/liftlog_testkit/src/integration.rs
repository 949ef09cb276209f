//! Cross-crate sync test helpers.
//!
//! Provides a harness that wires a local store, a reconciler, and an
//! in-process remote server together over the loopback transport.

use liftlog_core::WorkoutStore;
use liftlog_sync_engine::{HttpTransport, LoopbackClient, LoopbackServer, Reconciler, SyncConfig};
use liftlog_sync_server::RemoteServer;
use std::sync::Arc;

/// Routes reconciler traffic straight into an in-process remote server.
pub struct InProcessRemote {
    server: Arc<RemoteServer>,
}

impl LoopbackServer for InProcessRemote {
    fn handle_post(&self, body: &str) -> Result<String, String> {
        Ok(self.server.handle_raw(body))
    }
}

/// The transport used by [`SyncHarness`].
pub type HarnessTransport = HttpTransport<LoopbackClient<InProcessRemote>>;

/// A device (store plus reconciler) wired to a shared in-process remote.
pub struct SyncHarness {
    /// The device's local store.
    pub store: Arc<WorkoutStore>,
    /// The shared remote.
    pub remote: Arc<RemoteServer>,
    /// The reconciler connecting the two.
    pub reconciler: Reconciler<HarnessTransport>,
}

impl SyncHarness {
    /// Creates a harness against a fresh remote.
    pub fn new() -> Self {
        Self::against(Arc::new(RemoteServer::new()))
    }

    /// Creates a harness against an existing remote, as another device.
    pub fn against(remote: Arc<RemoteServer>) -> Self {
        let store = Arc::new(WorkoutStore::open_in_memory().expect("Failed to open store"));
        let transport = HttpTransport::from_config(
            LoopbackClient::new(InProcessRemote {
                server: Arc::clone(&remote),
            }),
            &SyncConfig::new(),
        );
        let reconciler = Reconciler::new(
            Arc::clone(&store),
            transport,
            SyncConfig::new().with_endpoint("https://example.com/exec"),
        );
        Self {
            store,
            remote,
            reconciler,
        }
    }

    /// Asserts the local dataset equals what the remote would serve.
    pub fn assert_in_sync(&self) {
        let snapshot = self
            .remote
            .snapshot()
            .into_snapshot()
            .expect("Remote snapshot should decode");
        let local = self.store.export_all();
        assert_eq!(local.exercises, snapshot.exercises, "exercises out of sync");
        assert_eq!(
            local.workout_log, snapshot.workout_log,
            "workout log out of sync"
        );
        assert_eq!(local.locations, snapshot.locations, "locations out of sync");
    }
}

impl Default for SyncHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates two devices sharing one remote.
pub fn two_device_pair() -> (SyncHarness, SyncHarness) {
    let first = SyncHarness::new();
    let second = SyncHarness::against(Arc::clone(&first.remote));
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{barbell_squat, bench_press, training_time};
    use liftlog_core::SetDraft;

    #[test]
    fn harness_round_trips_through_the_remote() {
        let harness = SyncHarness::new();
        let bench = harness.store.add_exercise(bench_press()).unwrap();
        harness
            .store
            .log_set(SetDraft::new(bench.id, 135.0, 8).at(training_time(0)))
            .unwrap();

        harness.reconciler.push().unwrap();
        harness.assert_in_sync();
    }

    #[test]
    fn two_devices_converge_through_push_and_pull() {
        let (desk, phone) = two_device_pair();
        desk.store.add_exercise(bench_press()).unwrap();
        desk.store.add_exercise(barbell_squat()).unwrap();

        desk.reconciler.push().unwrap();
        phone.reconciler.pull().unwrap();

        desk.assert_in_sync();
        phone.assert_in_sync();
        assert_eq!(phone.store.exercises(), desk.store.exercises());
    }
}
