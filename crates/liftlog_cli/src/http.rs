//! HTTP client for the sync engine, backed by reqwest.

use liftlog_sync_engine::HttpClient;
use std::time::Duration;

/// An [`HttpClient`] over a blocking reqwest client.
///
/// Redirects are followed, which matters for script-hosting endpoints
/// that answer POSTs with a redirect to the result document.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Builds a client. Timeouts are applied per request.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn post_json(&self, url: &str, body: &str, timeout: Duration) -> Result<String, String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .timeout(timeout)
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let text = response.text().map_err(|e| e.to_string())?;
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }
        Ok(text)
    }
}
