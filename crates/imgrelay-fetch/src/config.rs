//! Fetcher configuration.

use std::time::Duration;

/// Configuration for the reqwest-backed fetcher.
///
/// # Example
///
/// ```
/// use imgrelay_fetch::FetcherConfig;
/// use std::time::Duration;
///
/// let config = FetcherConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("my-proxy/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Per-fetch timeout, covering connect through full body read.
    pub(crate) timeout: Duration,
    /// Maximum number of redirects to follow before giving up.
    pub(crate) max_redirects: usize,
    /// User agent string for upstream requests.
    pub(crate) user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: concat!("imgrelay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetcherConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-fetch timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the redirect limit.
    ///
    /// Defaults to 10 redirects.
    #[must_use]
    pub const fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set the user agent string for upstream requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
