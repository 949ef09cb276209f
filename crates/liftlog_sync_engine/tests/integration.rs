//! Integration tests for the reconciler and remote server.

use liftlog_core::{ExerciseDraft, SetDraft, WorkoutStore};
use liftlog_sync_engine::{
    HttpTransport, LoopbackClient, LoopbackServer, Reconciler, SyncConfig, SyncError, SyncPhase,
    SyncResult, SyncTransport,
};
use liftlog_sync_protocol::{AckResponse, GetAllResponse, ReplaceAllPayload};
use liftlog_sync_server::RemoteServer;
use serde_json::json;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Routes engine requests straight into an in-process remote server.
struct RemoteHandler {
    server: Arc<RemoteServer>,
}

impl LoopbackServer for RemoteHandler {
    fn handle_post(&self, body: &str) -> Result<String, String> {
        Ok(self.server.handle_raw(body))
    }
}

/// A remote that never answers.
struct UnreachableServer;

impl LoopbackServer for UnreachableServer {
    fn handle_post(&self, _body: &str) -> Result<String, String> {
        Err("connection refused".to_string())
    }
}

type LoopbackTransport = HttpTransport<LoopbackClient<RemoteHandler>>;

fn transport_for(server: &Arc<RemoteServer>) -> LoopbackTransport {
    let handler = RemoteHandler {
        server: Arc::clone(server),
    };
    HttpTransport::from_config(LoopbackClient::new(handler), &SyncConfig::new())
}

fn reconciler_for(
    store: &Arc<WorkoutStore>,
    server: &Arc<RemoteServer>,
) -> Reconciler<LoopbackTransport> {
    Reconciler::new(
        Arc::clone(store),
        transport_for(server),
        SyncConfig::new().with_endpoint("https://example.com/exec"),
    )
}

fn seeded_store() -> Arc<WorkoutStore> {
    let store = Arc::new(WorkoutStore::open_in_memory().unwrap());
    let bench = store
        .add_exercise(
            ExerciseDraft::new("Bench Press")
                .with_primary(["Chest"])
                .with_secondary(["Triceps"])
                .with_locations(["Apartment Gym", "EOS Fitness"])
                .with_notes("Pause at the chest"),
        )
        .unwrap();
    let squat = store
        .add_exercise(ExerciseDraft::new("Squat").with_primary(["Quads"]))
        .unwrap();
    store
        .log_set(SetDraft::new(bench.id.clone(), 135.0, 8))
        .unwrap();
    store
        .log_set(SetDraft::new(squat.id.clone(), 225.0, 5))
        .unwrap();
    store
}

#[test]
fn push_then_pull_round_trips_across_stores() {
    let server = Arc::new(RemoteServer::new());

    // One device pushes its full dataset.
    let origin = seeded_store();
    origin.set_active_day(Some(2)).unwrap();
    let outcome = reconciler_for(&origin, &server).push().unwrap();
    assert_eq!(outcome.exercises, 2);
    assert_eq!(outcome.sets, 2);

    // A fresh device pulls it back.
    let replica = Arc::new(WorkoutStore::open_in_memory().unwrap());
    let outcome = reconciler_for(&replica, &server).pull().unwrap();
    assert_eq!(outcome.exercises, 2);
    assert_eq!(outcome.sets, 2);

    let pushed = origin.export_all();
    let pulled = replica.export_all();
    assert_eq!(pulled.exercises, pushed.exercises);
    assert_eq!(pulled.workout_log, pushed.workout_log);
    assert_eq!(pulled.locations, pushed.locations);
    // The active day is per device and never travels back.
    assert_eq!(replica.active_day(), None);

    // The wire's pipe-joined location column never leaks into the records.
    let bench = &pulled.exercises[0];
    assert_eq!(bench.locations, vec!["Apartment Gym", "EOS Fitness"]);
}

#[test]
fn legacy_remote_rows_normalize_on_pull() {
    let server = Arc::new(RemoteServer::new());
    server.seed_exercises(vec![json!({
        "id": "old1",
        "name": "Row",
        "primaryMuscles": ["Back"],
        "location": "Home|Garage"
    })]);
    server.seed_locations(vec!["Home".to_string(), "Garage".to_string()]);

    let store = Arc::new(WorkoutStore::open_in_memory().unwrap());
    reconciler_for(&store, &server).pull().unwrap();

    let exercises = store.exercises();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].locations, vec!["Home", "Garage"]);
    assert_eq!(store.locations(), vec!["Home", "Garage"]);
}

#[test]
fn pull_is_wholesale_even_when_remote_is_empty() {
    let server = Arc::new(RemoteServer::new());
    let store = seeded_store();
    let queued = store.queue_len();
    assert!(queued > 0);

    reconciler_for(&store, &server).pull().unwrap();

    assert!(store.exercises().is_empty());
    assert!(store.workout_log().is_empty());
    assert!(store.locations().is_empty());
    // Unpushed work survives the overwrite.
    assert_eq!(store.queue_len(), queued);
    assert!(store.last_sync().is_some());
}

#[test]
fn push_clears_queue_only_after_the_remote_acknowledges() {
    let server = Arc::new(RemoteServer::new());
    let store = seeded_store();
    let queued = store.queue_len();
    let reconciler = reconciler_for(&store, &server);

    server.set_error(Some("quota exceeded"));
    let result = reconciler.push();
    assert!(matches!(result, Err(SyncError::RemoteProtocol { .. })));
    assert_eq!(store.queue_len(), queued);
    assert_eq!(store.last_sync(), None);
    assert!(server.is_empty());

    server.set_error(None);
    reconciler.push().unwrap();
    assert_eq!(store.queue_len(), 0);
    assert!(store.last_sync().is_some());
    assert!(!server.is_empty());
}

#[test]
fn unreachable_remote_is_reported_retryable() {
    let store = seeded_store();
    let transport = HttpTransport::from_config(
        LoopbackClient::new(UnreachableServer),
        &SyncConfig::new(),
    );
    let reconciler = Reconciler::new(
        Arc::clone(&store),
        transport,
        SyncConfig::new().with_endpoint("https://example.com/exec"),
    );

    let err = reconciler.pull().unwrap_err();
    assert!(matches!(err, SyncError::RemoteUnavailable { .. }));
    assert!(err.is_retryable());
    assert_eq!(store.exercises().len(), 2);
    assert_eq!(store.queue_len(), 4);
}

#[test]
fn endpoint_comes_from_config_or_store_setting() {
    let server = Arc::new(RemoteServer::new());
    let store = Arc::new(WorkoutStore::open_in_memory().unwrap());
    let reconciler = Reconciler::new(
        Arc::clone(&store),
        transport_for(&server),
        SyncConfig::new(),
    );

    assert!(!reconciler.is_configured());
    assert!(matches!(reconciler.pull(), Err(SyncError::NotConfigured)));

    store
        .set_remote_url(Some("https://example.com/exec".to_string()))
        .unwrap();
    assert!(reconciler.is_configured());
    reconciler.pull().unwrap();
}

/// A transport that parks inside `get_all` until the test releases it.
struct GateTransport {
    entered: mpsc::Sender<()>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl SyncTransport for GateTransport {
    fn get_all(&self, _endpoint: &str) -> SyncResult<GetAllResponse> {
        self.entered.send(()).ok();
        let release = self.release.lock().unwrap();
        release.recv().ok();
        Ok(GetAllResponse::default())
    }

    fn replace_all(&self, _endpoint: &str, _payload: ReplaceAllPayload) -> SyncResult<AckResponse> {
        Ok(AckResponse::ok())
    }
}

#[test]
fn concurrent_sync_is_rejected_while_one_runs() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let transport = GateTransport {
        entered: entered_tx,
        release: Mutex::new(release_rx),
    };

    let store = Arc::new(WorkoutStore::open_in_memory().unwrap());
    let reconciler = Arc::new(Reconciler::new(
        store,
        transport,
        SyncConfig::new().with_endpoint("https://example.com/exec"),
    ));

    let worker = {
        let reconciler = Arc::clone(&reconciler);
        thread::spawn(move || reconciler.pull())
    };

    // Wait until the first pull is parked inside the transport.
    entered_rx.recv().unwrap();
    assert_eq!(reconciler.phase(), SyncPhase::Pulling);
    assert!(matches!(reconciler.pull(), Err(SyncError::InFlight)));
    assert!(matches!(reconciler.push(), Err(SyncError::InFlight)));

    release_tx.send(()).unwrap();
    worker.join().unwrap().unwrap();
    assert_eq!(reconciler.phase(), SyncPhase::Idle);
}
