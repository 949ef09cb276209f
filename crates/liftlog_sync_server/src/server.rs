//! The remote endpoint.

use liftlog_sync_protocol::{GetAllResponse, SyncRequest};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
struct RemoteState {
    exercises: Vec<Value>,
    workout_log: Vec<Value>,
    locations: Vec<String>,
}

/// An in-process stand-in for the hosted sync endpoint.
///
/// The production remote is a spreadsheet fronted by a script that answers
/// a single POST route. This server reproduces its observable behavior:
///
/// - `getAll` returns the stored rows verbatim
/// - `replaceAll` overwrites all stored rows with the pushed snapshot
/// - every reply is a JSON object, and failures are reported through an
///   `error` field rather than a transport status
/// - the pushed `activeDay` is accepted and dropped; it never comes back
///
/// Rows are held as raw JSON, so whatever shape a client pushes is the
/// shape every client pulls.
///
/// # Example
///
/// ```
/// use liftlog_sync_server::RemoteServer;
/// use liftlog_sync_protocol::SyncRequest;
///
/// let server = RemoteServer::new();
/// let reply = server.handle(SyncRequest::GetAll);
/// assert!(reply["exercises"].as_array().unwrap().is_empty());
/// ```
#[derive(Default)]
pub struct RemoteServer {
    state: RwLock<RemoteState>,
    scripted_error: Mutex<Option<String>>,
}

impl RemoteServer {
    /// Creates an empty remote.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a decoded request and produces the reply body.
    pub fn handle(&self, request: SyncRequest) -> Value {
        if let Some(message) = self.scripted_error.lock().clone() {
            warn!(action = request.action(), %message, "answering with scripted error");
            return json!({ "error": message });
        }

        match request {
            SyncRequest::GetAll => {
                let state = self.state.read();
                debug!(
                    exercises = state.exercises.len(),
                    sets = state.workout_log.len(),
                    "serving getAll"
                );
                json!({
                    "exercises": state.exercises,
                    "workoutLog": state.workout_log,
                    "locations": state.locations,
                })
            }
            SyncRequest::ReplaceAll(payload) => {
                let mut state = self.state.write();
                state.exercises = to_rows(&payload.exercises);
                state.workout_log = to_rows(&payload.workout_log);
                state.locations = payload.locations;
                info!(
                    exercises = state.exercises.len(),
                    sets = state.workout_log.len(),
                    "replaced remote dataset"
                );
                json!({ "status": "ok" })
            }
        }
    }

    /// Handles a raw POST body and returns the reply body.
    ///
    /// Undecodable bodies are answered with an `error` reply, matching the
    /// endpoint this stands in for.
    pub fn handle_raw(&self, body: &str) -> String {
        let reply = match SyncRequest::decode(body) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!(%err, "rejected request body");
                json!({ "error": err.to_string() })
            }
        };
        reply.to_string()
    }

    /// Makes every following request fail with the given error text, or
    /// clears the script with `None`.
    pub fn set_error(&self, message: Option<&str>) {
        *self.scripted_error.lock() = message.map(str::to_string);
    }

    /// Seeds raw exercise rows, replacing any stored ones.
    pub fn seed_exercises(&self, rows: Vec<Value>) {
        self.state.write().exercises = rows;
    }

    /// Seeds raw workout log rows, replacing any stored ones.
    pub fn seed_workout_log(&self, rows: Vec<Value>) {
        self.state.write().workout_log = rows;
    }

    /// Seeds the locations registry, replacing any stored one.
    pub fn seed_locations(&self, locations: Vec<String>) {
        self.state.write().locations = locations;
    }

    /// Returns the stored dataset as a `getAll` reply.
    #[must_use]
    pub fn snapshot(&self) -> GetAllResponse {
        let state = self.state.read();
        GetAllResponse {
            exercises: state.exercises.clone(),
            workout_log: state.workout_log.clone(),
            locations: state.locations.clone(),
            status: None,
            error: None,
        }
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.exercises.is_empty() && state.workout_log.is_empty() && state.locations.is_empty()
    }
}

fn to_rows<T: Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect()
}
