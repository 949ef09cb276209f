//! Wire-format test vectors for the sync protocol.
//!
//! These bodies pin the exact JSON exchanged with the remote endpoint,
//! so every client stays compatible with spreadsheets already in use,
//! including rows written by much older clients.

use serde::{Deserialize, Serialize};

/// A test vector that can be shared across clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// The raw JSON body.
    pub body: String,
    /// Fragment the decode error must contain, if decoding should fail.
    pub expected_error: Option<String>,
}

impl WireVector {
    fn ok(id: &str, description: &str, body: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            body: body.into(),
            expected_error: None,
        }
    }

    fn err(id: &str, description: &str, body: &str, fragment: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            body: body.into(),
            expected_error: Some(fragment.into()),
        }
    }
}

/// Request bodies a client sends.
pub fn request_vectors() -> Vec<WireVector> {
    vec![
        WireVector::ok(
            "request_get_all",
            "The getAll request carries only the action",
            r#"{"action":"getAll"}"#,
        ),
        WireVector::ok(
            "request_replace_all",
            "The replaceAll request flattens the snapshot beside the action",
            r#"{"action":"replaceAll","exercises":[{"id":"a1b2c3d4","name":"Bench Press","primaryMuscles":["Chest"],"secondaryMuscles":["Triceps"],"locations":["Apartment Gym","EOS Fitness"],"notes":"","location":"Apartment Gym|EOS Fitness"}],"workoutLog":[{"id":"e5f6a7b8","exerciseId":"a1b2c3d4","exerciseName":"Bench Press","dayNumber":1,"setNumber":1,"weight":135.0,"reps":8,"timestamp":"2024-02-05T18:00:00Z"}],"locations":["Apartment Gym","EOS Fitness"],"activeDay":1}"#,
        ),
        WireVector::ok(
            "request_replace_all_empty",
            "An empty snapshot is a valid replaceAll",
            r#"{"action":"replaceAll","exercises":[],"workoutLog":[],"locations":[]}"#,
        ),
        WireVector::err(
            "request_unknown_action",
            "Unknown actions do not decode",
            r#"{"action":"merge"}"#,
            "unknown variant",
        ),
    ]
}

/// Reply bodies a client must accept or reject.
pub fn get_all_reply_vectors() -> Vec<WireVector> {
    vec![
        WireVector::ok(
            "reply_current_rows",
            "A reply with rows in the current shape",
            r#"{"exercises":[{"id":"a1b2c3d4","name":"Bench Press","primaryMuscles":["Chest"],"secondaryMuscles":[],"locations":["EOS Fitness"],"notes":""}],"workoutLog":[{"id":"e5f6a7b8","exerciseId":"a1b2c3d4","exerciseName":"Bench Press","dayNumber":0,"setNumber":1,"weight":135.0,"reps":8,"timestamp":"2024-02-05T18:00:00Z"}],"locations":["EOS Fitness"]}"#,
        ),
        WireVector::ok(
            "reply_legacy_rows",
            "Rows written by older clients carry a pipe-joined location column",
            r#"{"exercises":[{"id":"old00001","name":"Row","primaryMuscles":["Back"],"location":"Home|Garage"}],"workoutLog":[],"locations":["Home","Garage"]}"#,
        ),
        WireVector::ok(
            "reply_offset_timestamp",
            "Timestamps may use a numeric offset instead of Z",
            r#"{"exercises":[],"workoutLog":[{"id":"e5f6a7b8","exerciseId":"a1b2c3d4","exerciseName":"Bench Press","dayNumber":0,"setNumber":1,"weight":135.0,"reps":8,"timestamp":"2024-02-05T12:00:00-06:00"}],"locations":[]}"#,
        ),
        WireVector::ok(
            "reply_empty_object",
            "A bare object reads as an empty dataset",
            r#"{}"#,
        ),
        WireVector::ok(
            "reply_null_error",
            "A null error field does not block the reply",
            r#"{"exercises":[],"workoutLog":[],"locations":[],"error":null}"#,
        ),
        WireVector::ok(
            "reply_empty_error",
            "An empty-string error field does not block the reply",
            r#"{"exercises":[],"workoutLog":[],"locations":[],"error":""}"#,
        ),
        WireVector::err(
            "reply_string_error",
            "A non-empty error field blocks the reply",
            r#"{"error":"Sheet not found"}"#,
            "Sheet not found",
        ),
        WireVector::err(
            "reply_object_error",
            "A structured error field is reported as JSON",
            r#"{"error":{"code":500}}"#,
            "500",
        ),
        WireVector::err(
            "reply_malformed_exercise",
            "A row that cannot decode names its section",
            r#"{"exercises":[42],"workoutLog":[],"locations":[]}"#,
            "exercises",
        ),
        WireVector::err(
            "reply_malformed_set",
            "A workout log row that cannot decode names its section",
            r#"{"exercises":[],"workoutLog":[{"id":"x"}],"locations":[]}"#,
            "workoutLog",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_sync_protocol::{GetAllResponse, SyncRequest};

    #[test]
    fn request_vectors_decode_as_expected() {
        for vector in request_vectors() {
            let result = SyncRequest::decode(&vector.body);
            match &vector.expected_error {
                None => {
                    let request = result.unwrap_or_else(|e| {
                        panic!("vector {} should decode: {e}", vector.id);
                    });
                    // Round-tripping must preserve the body's meaning.
                    let encoded = request.encode().unwrap();
                    let reparsed = SyncRequest::decode(&encoded).unwrap();
                    assert_eq!(request, reparsed, "vector {}", vector.id);
                }
                Some(fragment) => {
                    let err = result.expect_err("vector should fail to decode");
                    assert!(
                        err.to_string().contains(fragment),
                        "vector {}: {err} should mention {fragment}",
                        vector.id
                    );
                }
            }
        }
    }

    #[test]
    fn reply_vectors_decode_as_expected() {
        for vector in get_all_reply_vectors() {
            let result =
                GetAllResponse::decode(&vector.body).and_then(|reply| reply.into_snapshot());
            match &vector.expected_error {
                None => {
                    result.unwrap_or_else(|e| {
                        panic!("vector {} should decode: {e}", vector.id);
                    });
                }
                Some(fragment) => {
                    let err = result.expect_err("vector should fail to decode");
                    assert!(
                        err.to_string().contains(fragment),
                        "vector {}: {err} should mention {fragment}",
                        vector.id
                    );
                }
            }
        }
    }

    #[test]
    fn legacy_location_column_folds_into_the_array() {
        let vector = get_all_reply_vectors()
            .into_iter()
            .find(|v| v.id == "reply_legacy_rows")
            .unwrap();
        let snapshot = GetAllResponse::decode(&vector.body)
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert_eq!(snapshot.exercises[0].locations, vec!["Home", "Garage"]);
    }
}
