//! Configuration for the sync reconciler.

use std::time::Duration;

/// Default request timeout for sync calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for sync operations.
///
/// The endpoint is optional on purpose: an unconfigured reconciler reports
/// [`crate::SyncError::NotConfigured`] instead of guessing. When no
/// explicit endpoint is set here, the reconciler falls back to the URL
/// stored in the store's settings.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Explicit remote endpoint, overriding the store setting.
    pub endpoint: Option<String>,
    /// Request timeout for sync calls.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Creates a configuration with no endpoint and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the remote endpoint. A blank URL leaves it unset.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim();
        self.endpoint = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = SyncConfig::new()
            .with_endpoint("https://sync.example.com/exec")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://sync.example.com/exec")
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_endpoint_stays_unset() {
        let config = SyncConfig::new().with_endpoint("   ");
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(SyncConfig::default().timeout, Duration::from_secs(30));
    }
}
