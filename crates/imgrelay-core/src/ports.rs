//! The fetcher port.
//!
//! The race coordinator only ever talks to candidates through
//! [`ImageFetcher`], so transports can be swapped and the race tested
//! without touching the network. The production implementation lives in
//! `imgrelay-fetch`; adapter errors are mapped into [`FetchError`] at that
//! boundary.

use crate::domain::{Candidate, ImageFormat};
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Why a single candidate fetch failed.
///
/// Retained for logging only; per-candidate failures are never surfaced to
/// the end caller individually.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned status {status} for {url}")]
    Status {
        /// The HTTP status code upstream answered with.
        status: u16,
        /// The candidate URL that was requested.
        url: String,
    },

    /// The per-fetch timeout elapsed.
    #[error("fetch timed out for {url}")]
    Timeout {
        /// The candidate URL that was requested.
        url: String,
    },

    /// Connection, redirect-limit or other transport failure.
    #[error("network error for {url}: {message}")]
    Network {
        /// The candidate URL that was requested.
        url: String,
        /// Transport error detail.
        message: String,
    },
}

/// Terminal report of one fetch task. Produced exactly once per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The candidate resolved; the fully buffered payload and its tag.
    Success {
        /// The complete response body.
        bytes: Bytes,
        /// The format the candidate was tagged with.
        format: ImageFormat,
    },
    /// The candidate did not resolve.
    Failure(FetchError),
    /// The task was cancelled before it could resolve.
    Cancelled,
}

/// One candidate retrieval: GET the URL, follow redirects, buffer the whole
/// body, bounded by the implementation's per-fetch timeout.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch a single candidate and report its outcome.
    async fn fetch(&self, candidate: &Candidate) -> FetchOutcome;
}

#[cfg(test)]
pub mod testing {
    //! A programmable fetcher for race tests, in the spirit of a canned
    //! HTTP backend: respond per URL substring, optionally after a delay,
    //! and count in-flight fetches so tests can assert nothing leaks.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Canned reply for one URL pattern.
    #[derive(Debug, Clone)]
    pub struct CannedFetch {
        /// Outcome to report once the delay elapses.
        pub outcome: FetchOutcome,
        /// Simulated network latency.
        pub delay: Duration,
    }

    impl CannedFetch {
        pub fn success(body: &'static [u8], format: ImageFormat, delay: Duration) -> Self {
            Self {
                outcome: FetchOutcome::Success {
                    bytes: Bytes::from_static(body),
                    format,
                },
                delay,
            }
        }

        pub fn not_found(url: &str, delay: Duration) -> Self {
            Self {
                outcome: FetchOutcome::Failure(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                }),
                delay,
            }
        }
    }

    /// Decrements the in-flight counter when the fetch future is dropped,
    /// whether it completed, was cancelled or was aborted.
    struct InFlightGuard(Arc<AtomicUsize>);

    impl Drop for InFlightGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// A fake fetcher returning canned outcomes keyed by URL substring.
    pub struct FakeFetcher {
        responses: Mutex<Vec<(String, CannedFetch)>>,
        in_flight: Arc<AtomicUsize>,
        started: Arc<AtomicUsize>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                in_flight: Arc::new(AtomicUsize::new(0)),
                started: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Add a canned reply for URLs containing `pattern`.
        #[must_use]
        pub fn with_response(self, pattern: &str, canned: CannedFetch) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push((pattern.to_string(), canned));
            self
        }

        /// Fetches currently in flight (started but not yet dropped).
        pub fn in_flight(&self) -> usize {
            self.in_flight.load(Ordering::SeqCst)
        }

        /// Total fetches ever started.
        pub fn started(&self) -> usize {
            self.started.load(Ordering::SeqCst)
        }

        fn find_response(&self, url: &str) -> Option<CannedFetch> {
            let responses = self.responses.lock().unwrap();
            responses
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map(|(_, canned)| canned.clone())
        }
    }

    impl Default for FakeFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ImageFetcher for FakeFetcher {
        async fn fetch(&self, candidate: &Candidate) -> FetchOutcome {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            let _guard = InFlightGuard(Arc::clone(&self.in_flight));

            let url = candidate.url().as_str().to_string();
            let canned = self
                .find_response(&url)
                .unwrap_or_else(|| CannedFetch::not_found(&url, Duration::ZERO));

            tokio::time::sleep(canned.delay).await;
            canned.outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages_retain_url_and_status() {
        let error = FetchError::Status {
            status: 404,
            url: "http://upstream/u/abc.png".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("abc.png"));

        let error = FetchError::Timeout {
            url: "http://upstream/u/abc.jpg".to_string(),
        };
        assert!(error.to_string().contains("timed out"));
    }
}
