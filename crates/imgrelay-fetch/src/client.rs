//! The reqwest `ImageFetcher` implementation.

use async_trait::async_trait;
use imgrelay_core::{Candidate, FetchError, FetchOutcome, ImageFetcher};
use reqwest::redirect::Policy;

use crate::config::FetcherConfig;

/// Fetches candidates over HTTP with a shared reqwest client.
///
/// The client owns the connection pool; per-request state is limited to the
/// response buffer, which transfers to the caller inside the outcome.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher from the given configuration.
    #[must_use]
    pub fn new(config: &FetcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }
}

/// Collapse a reqwest error into the core failure taxonomy.
fn map_transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl ImageFetcher for ReqwestFetcher {
    async fn fetch(&self, candidate: &Candidate) -> FetchOutcome {
        let url = candidate.url().as_str();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(error) => return FetchOutcome::Failure(map_transport_error(url, &error)),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Failure(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Buffer the whole body; the race hands complete payloads around,
        // never partial streams.
        match response.bytes().await {
            Ok(bytes) => FetchOutcome::Success {
                bytes,
                format: candidate.format(),
            },
            Err(error) => FetchOutcome::Failure(map_transport_error(url, &error)),
        }
    }
}
