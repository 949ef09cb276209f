//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted behind a trait so the engine works
//! with any blocking HTTP library, and with no network at all in tests.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::SyncTransport;
use liftlog_sync_protocol::{AckResponse, GetAllResponse, ReplaceAllPayload, SyncRequest};
use std::time::Duration;

/// HTTP client abstraction.
///
/// Implementations send a JSON POST and hand back the raw reply body.
/// Connection failures and timeouts are reported as `Err`; any body the
/// remote actually produced comes back as `Ok`, including error replies.
pub trait HttpClient: Send + Sync {
    /// Sends `body` as a JSON POST to `url` and returns the reply body.
    ///
    /// # Errors
    ///
    /// Returns the transport's error text when the remote cannot be
    /// reached within `timeout`.
    fn post_json(&self, url: &str, body: &str, timeout: Duration) -> Result<String, String>;
}

/// A [`SyncTransport`] that speaks the single-endpoint JSON protocol over
/// an [`HttpClient`].
pub struct HttpTransport<C: HttpClient> {
    client: C,
    timeout: Duration,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a transport with the given client and timeout.
    pub fn new(client: C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Creates a transport taking its timeout from a [`SyncConfig`].
    pub fn from_config(client: C, config: &SyncConfig) -> Self {
        Self::new(client, config.timeout)
    }

    fn post(&self, endpoint: &str, request: &SyncRequest) -> SyncResult<String> {
        let body = request.encode()?;
        self.client
            .post_json(endpoint, &body, self.timeout)
            .map_err(SyncError::unavailable)
    }
}

impl<C: HttpClient> SyncTransport for HttpTransport<C> {
    fn get_all(&self, endpoint: &str) -> SyncResult<GetAllResponse> {
        let reply = self.post(endpoint, &SyncRequest::GetAll)?;
        Ok(GetAllResponse::decode(&reply)?)
    }

    fn replace_all(&self, endpoint: &str, payload: ReplaceAllPayload) -> SyncResult<AckResponse> {
        let reply = self.post(endpoint, &SyncRequest::ReplaceAll(payload))?;
        Ok(AckResponse::decode(&reply)?)
    }
}

/// A server that can answer loopback posts in process.
///
/// Implemented by test harnesses that wrap the reference server, avoiding
/// any real network.
pub trait LoopbackServer {
    /// Handles a POST body and returns the reply body.
    ///
    /// # Errors
    ///
    /// Returns the transport-level error text when the "connection" fails.
    fn handle_post(&self, body: &str) -> Result<String, String>;
}

/// An [`HttpClient`] that routes requests straight to a [`LoopbackServer`].
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer + Send + Sync> LoopbackClient<S> {
    /// Creates a client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }
}

impl<S: LoopbackServer + Send + Sync> HttpClient for LoopbackClient<S> {
    fn post_json(&self, _url: &str, body: &str, _timeout: Duration) -> Result<String, String> {
        self.server.handle_post(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct ScriptedClient {
        reply: Mutex<Result<String, String>>,
    }

    impl ScriptedClient {
        fn replying(body: &str) -> Self {
            Self {
                reply: Mutex::new(Ok(body.to_string())),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Mutex::new(Err(message.to_string())),
            }
        }
    }

    impl HttpClient for ScriptedClient {
        fn post_json(&self, _url: &str, _body: &str, _timeout: Duration) -> Result<String, String> {
            self.reply.lock().clone()
        }
    }

    #[test]
    fn get_all_decodes_the_reply() {
        let client = ScriptedClient::replying(r#"{"exercises":[],"workoutLog":[],"locations":["Garage"]}"#);
        let transport = HttpTransport::new(client, Duration::from_secs(1));

        let reply = transport.get_all("https://example.com/exec").unwrap();
        assert_eq!(reply.locations, vec!["Garage"]);
    }

    #[test]
    fn connection_failures_map_to_unavailable() {
        let client = ScriptedClient::failing("connect timeout");
        let transport = HttpTransport::new(client, Duration::from_secs(1));

        let result = transport.get_all("https://example.com/exec");
        assert!(matches!(
            result,
            Err(SyncError::RemoteUnavailable { ref message }) if message == "connect timeout"
        ));
    }

    #[test]
    fn garbage_replies_map_to_protocol_errors() {
        let client = ScriptedClient::replying("<html>504</html>");
        let transport = HttpTransport::new(client, Duration::from_secs(1));

        let result = transport.get_all("https://example.com/exec");
        assert!(matches!(result, Err(SyncError::RemoteProtocol { .. })));
    }

    #[test]
    fn replace_all_decodes_the_ack() {
        let client = ScriptedClient::replying(r#"{"status":"ok"}"#);
        let transport = HttpTransport::new(client, Duration::from_secs(1));

        let ack = transport
            .replace_all("https://example.com/exec", ReplaceAllPayload::default())
            .unwrap();
        assert!(ack.into_result().is_ok());
    }
}
