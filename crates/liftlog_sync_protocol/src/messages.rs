//! Wire messages for the sync endpoint.
//!
//! The remote speaks a single-endpoint JSON protocol: every call is a POST
//! whose body names an `action`, and every reply is a JSON object. A reply
//! carrying a non-empty `error` field is a failure regardless of transport
//! status, and replies are decoded tolerantly because the remote may be a
//! spreadsheet script that fills in only what it knows.

use crate::error::{ProtocolError, ProtocolResult};
use liftlog_core::migrate::normalize_exercise_value;
use liftlog_core::{BackupFile, Exercise, SetEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to the sync endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SyncRequest {
    /// Fetch the complete remote dataset.
    GetAll,
    /// Replace the complete remote dataset with the attached snapshot.
    ReplaceAll(ReplaceAllPayload),
}

impl SyncRequest {
    /// Encodes the request as a POST body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> ProtocolResult<String> {
        serde_json::to_string(self).map_err(|e| ProtocolError::malformed("request", e))
    }

    /// Decodes a POST body, as the remote endpoint does.
    ///
    /// # Errors
    ///
    /// Returns an error for bodies that are not valid requests, including
    /// unknown actions.
    pub fn decode(body: &str) -> ProtocolResult<Self> {
        serde_json::from_str(body).map_err(|e| ProtocolError::malformed("request", e))
    }

    /// The wire value of the `action` field.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetAll => "getAll",
            Self::ReplaceAll(_) => "replaceAll",
        }
    }
}

/// The full snapshot sent by `replaceAll`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllPayload {
    /// Exercise definitions, each in dual location form.
    #[serde(default)]
    pub exercises: Vec<WireExercise>,
    /// The complete workout log.
    #[serde(default)]
    pub workout_log: Vec<SetEntry>,
    /// The locations registry.
    #[serde(default)]
    pub locations: Vec<String>,
    /// The sender's active training day. Rides along for remote layouts
    /// that keep a column for it; the remote never hands it back.
    #[serde(default)]
    pub active_day: Option<u8>,
}

impl ReplaceAllPayload {
    /// Builds the payload from a local export.
    #[must_use]
    pub fn from_snapshot(snapshot: BackupFile) -> Self {
        Self {
            exercises: snapshot
                .exercises
                .into_iter()
                .map(WireExercise::from)
                .collect(),
            workout_log: snapshot.workout_log,
            locations: snapshot.locations,
            active_day: snapshot.active_day,
        }
    }
}

/// An exercise as it travels on the wire.
///
/// Exercises are pushed in dual form: the canonical `locations` array plus
/// a pipe-joined `location` string for remote layouts that store one text
/// column. Pulled rows may carry either form;
/// [`GetAllResponse::into_snapshot`] folds both back into the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireExercise {
    /// The exercise record.
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Pipe-joined copy of the locations list.
    #[serde(default)]
    pub location: String,
}

impl From<Exercise> for WireExercise {
    fn from(exercise: Exercise) -> Self {
        let location = exercise.locations.join("|");
        Self { exercise, location }
    }
}

/// Reply to `getAll`.
///
/// Rows arrive as raw JSON and are normalized before typed decoding, so a
/// remote still holding rows written by older clients (single `location`
/// string, missing arrays) loads the same as a current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllResponse {
    /// Raw exercise rows.
    #[serde(default)]
    pub exercises: Vec<Value>,
    /// Raw workout log rows.
    #[serde(default)]
    pub workout_log: Vec<Value>,
    /// The locations registry.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Remote status note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remote-reported error. Any non-empty value fails the pull.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl GetAllResponse {
    /// Decodes a reply body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object of the expected
    /// shape. A reply whose `error` field is set decodes fine; the error
    /// surfaces in [`GetAllResponse::into_snapshot`].
    pub fn decode(body: &str) -> ProtocolResult<Self> {
        serde_json::from_str(body).map_err(|e| ProtocolError::malformed("getAll reply", e))
    }

    /// The remote-reported error, if the reply carries one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        error_text(self.error.as_ref())
    }

    /// Validates the reply and decodes its rows into a typed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Remote`] when the reply carries an error,
    /// or [`ProtocolError::Malformed`] when a row does not decode.
    pub fn into_snapshot(self) -> ProtocolResult<RemoteSnapshot> {
        if let Some(message) = error_text(self.error.as_ref()) {
            return Err(ProtocolError::Remote { message });
        }

        let mut exercises = Vec::with_capacity(self.exercises.len());
        for mut row in self.exercises {
            normalize_exercise_value(&mut row);
            let exercise: Exercise = serde_json::from_value(row)
                .map_err(|e| ProtocolError::malformed("exercises row", e))?;
            exercises.push(exercise);
        }

        let mut workout_log = Vec::with_capacity(self.workout_log.len());
        for row in self.workout_log {
            let entry: SetEntry = serde_json::from_value(row)
                .map_err(|e| ProtocolError::malformed("workoutLog row", e))?;
            workout_log.push(entry);
        }

        Ok(RemoteSnapshot {
            exercises,
            workout_log,
            locations: self.locations,
        })
    }
}

/// A typed remote dataset, ready to hand to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteSnapshot {
    /// Exercise definitions.
    pub exercises: Vec<Exercise>,
    /// The workout log.
    pub workout_log: Vec<SetEntry>,
    /// The locations registry.
    pub locations: Vec<String>,
}

impl RemoteSnapshot {
    /// Returns `true` when the remote holds no data at all.
    ///
    /// An empty snapshot is still applied on pull; this exists for logging
    /// and display, not for skipping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.workout_log.is_empty() && self.locations.is_empty()
    }
}

/// Reply to `replaceAll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    /// Remote status note, usually `"ok"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remote-reported error. Any non-empty value fails the push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl AckResponse {
    /// Creates a success acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: Some("ok".to_string()),
            error: None,
        }
    }

    /// Creates a failure acknowledgement.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error: Some(Value::String(message.into())),
        }
    }

    /// Decodes a reply body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object.
    pub fn decode(body: &str) -> ProtocolResult<Self> {
        serde_json::from_str(body).map_err(|e| ProtocolError::malformed("replaceAll reply", e))
    }

    /// The remote-reported error, if the reply carries one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        error_text(self.error.as_ref())
    }

    /// Turns the acknowledgement into a result.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Remote`] when the reply carries an error.
    pub fn into_result(self) -> ProtocolResult<()> {
        match error_text(self.error.as_ref()) {
            Some(message) => Err(ProtocolError::Remote { message }),
            None => Ok(()),
        }
    }
}

/// Extracts the error text from a reply's `error` field.
///
/// `null`, `false`, and `""` count as "no error". Non-string values are
/// reported with their JSON rendering.
fn error_text(error: Option<&Value>) -> Option<String> {
    match error? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
