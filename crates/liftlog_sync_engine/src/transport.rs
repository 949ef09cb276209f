//! Transport abstraction for sync operations.

use crate::error::{SyncError, SyncResult};
use liftlog_sync_protocol::{AckResponse, GetAllResponse, ReplaceAllPayload};
use parking_lot::Mutex;
use std::sync::Arc;

/// A sync transport carries requests to the remote endpoint.
///
/// The endpoint URL is passed per call rather than held by the transport,
/// so one transport serves whatever endpoint is configured at the time of
/// the call. Implementations map connection failures and timeouts to
/// [`SyncError::RemoteUnavailable`] and undecodable replies to
/// [`SyncError::RemoteProtocol`].
pub trait SyncTransport: Send + Sync {
    /// Fetches the complete remote dataset.
    fn get_all(&self, endpoint: &str) -> SyncResult<GetAllResponse>;

    /// Replaces the remote dataset with a full snapshot.
    fn replace_all(&self, endpoint: &str, payload: ReplaceAllPayload) -> SyncResult<AckResponse>;
}

impl<T: SyncTransport + ?Sized> SyncTransport for Arc<T> {
    fn get_all(&self, endpoint: &str) -> SyncResult<GetAllResponse> {
        (**self).get_all(endpoint)
    }

    fn replace_all(&self, endpoint: &str, payload: ReplaceAllPayload) -> SyncResult<AckResponse> {
        (**self).replace_all(endpoint, payload)
    }
}

/// A scriptable transport for tests.
#[derive(Default)]
pub struct MockTransport {
    get_all_reply: Mutex<Option<GetAllResponse>>,
    replace_all_reply: Mutex<Option<AckResponse>>,
    unavailable: Mutex<Option<String>>,
    endpoints: Mutex<Vec<String>>,
    pushed: Mutex<Vec<ReplaceAllPayload>>,
}

impl MockTransport {
    /// Creates a transport with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the reply to `get_all`.
    pub fn set_get_all(&self, reply: GetAllResponse) {
        *self.get_all_reply.lock() = Some(reply);
    }

    /// Scripts the reply to `replace_all`.
    pub fn set_replace_all(&self, reply: AckResponse) {
        *self.replace_all_reply.lock() = Some(reply);
    }

    /// Makes every call fail as unreachable, or clears that with `None`.
    pub fn set_unavailable(&self, message: Option<&str>) {
        *self.unavailable.lock() = message.map(str::to_string);
    }

    /// Returns the endpoints the transport was called with, in order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().clone()
    }

    /// Returns every payload passed to `replace_all`, in order.
    #[must_use]
    pub fn pushed(&self) -> Vec<ReplaceAllPayload> {
        self.pushed.lock().clone()
    }

    fn check_available(&self) -> SyncResult<()> {
        match self.unavailable.lock().clone() {
            Some(message) => Err(SyncError::unavailable(message)),
            None => Ok(()),
        }
    }
}

impl SyncTransport for MockTransport {
    fn get_all(&self, endpoint: &str) -> SyncResult<GetAllResponse> {
        self.endpoints.lock().push(endpoint.to_string());
        self.check_available()?;
        self.get_all_reply
            .lock()
            .clone()
            .ok_or_else(|| SyncError::protocol("no scripted getAll reply"))
    }

    fn replace_all(&self, endpoint: &str, payload: ReplaceAllPayload) -> SyncResult<AckResponse> {
        self.endpoints.lock().push(endpoint.to_string());
        self.check_available()?;
        self.pushed.lock().push(payload);
        self.replace_all_reply
            .lock()
            .clone()
            .ok_or_else(|| SyncError::protocol("no scripted replaceAll reply"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_calls_report_protocol_errors() {
        let transport = MockTransport::new();
        assert!(matches!(
            transport.get_all("https://example.com"),
            Err(SyncError::RemoteProtocol { .. })
        ));
    }

    #[test]
    fn unavailable_wins_over_scripted_replies() {
        let transport = MockTransport::new();
        transport.set_get_all(GetAllResponse::default());
        transport.set_unavailable(Some("connection refused"));

        assert!(matches!(
            transport.get_all("https://example.com"),
            Err(SyncError::RemoteUnavailable { .. })
        ));

        transport.set_unavailable(None);
        assert!(transport.get_all("https://example.com").is_ok());
    }

    #[test]
    fn calls_are_recorded() {
        let transport = MockTransport::new();
        transport.set_replace_all(AckResponse::ok());
        transport
            .replace_all("https://example.com/exec", ReplaceAllPayload::default())
            .unwrap();

        assert_eq!(transport.endpoints(), vec!["https://example.com/exec"]);
        assert_eq!(transport.pushed().len(), 1);
    }
}
