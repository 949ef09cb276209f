//! Error types for the sync reconciler.

use liftlog_sync_protocol::ProtocolError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a pull or push.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No remote endpoint is configured. Sync never runs implicitly, so
    /// this is reported to the caller instead of being skipped quietly.
    #[error("no remote endpoint is configured")]
    NotConfigured,

    /// Another pull or push is already running.
    #[error("a sync is already in progress")]
    InFlight,

    /// The remote could not be reached: connection failure or timeout.
    #[error("remote unavailable: {message}")]
    RemoteUnavailable {
        /// Transport error text.
        message: String,
    },

    /// The remote answered, but the reply reported an error or did not
    /// decode as a sync reply.
    #[error("remote protocol error: {message}")]
    RemoteProtocol {
        /// What the remote said, or what failed to decode.
        message: String,
    },

    /// The local store failed while snapshotting or applying data.
    #[error(transparent)]
    Store(#[from] liftlog_core::StoreError),
}

impl SyncError {
    /// Creates a [`SyncError::RemoteUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            message: message.into(),
        }
    }

    /// Creates a [`SyncError::RemoteProtocol`].
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::RemoteProtocol {
            message: message.into(),
        }
    }

    /// Returns `true` when retrying the same call may succeed.
    ///
    /// Replace-all pushes and read-only pulls are both idempotent, so an
    /// unavailable remote is always safe to retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable { .. } | Self::InFlight)
    }
}

impl From<ProtocolError> for SyncError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Remote { message } => Self::RemoteProtocol { message },
            malformed @ ProtocolError::Malformed { .. } => Self::RemoteProtocol {
                message: malformed.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(SyncError::unavailable("connection refused").is_retryable());
        assert!(SyncError::InFlight.is_retryable());
        assert!(!SyncError::NotConfigured.is_retryable());
        assert!(!SyncError::protocol("bad reply").is_retryable());
    }

    #[test]
    fn protocol_errors_map_by_kind() {
        let err: SyncError = ProtocolError::remote("sheet missing").into();
        assert!(matches!(err, SyncError::RemoteProtocol { ref message } if message == "sheet missing"));

        let err: SyncError = ProtocolError::malformed("getAll reply", "not an object").into();
        assert!(
            matches!(err, SyncError::RemoteProtocol { ref message } if message.contains("getAll reply"))
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SyncError::NotConfigured.to_string(),
            "no remote endpoint is configured"
        );
        assert_eq!(
            SyncError::unavailable("timed out").to_string(),
            "remote unavailable: timed out"
        );
    }
}
