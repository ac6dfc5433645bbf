//! Server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter: the reqwest fetcher, the variant resolver and the
//! race coordinator are all instantiated here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use imgrelay_core::{ImageFormat, RaceCoordinator, VariantResolver};
use imgrelay_fetch::{FetcherConfig, ReqwestFetcher};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (the original proxy served `*`).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the web adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Upstream base URL candidates are built from, path prefix included.
    pub upstream_base_url: String,
    /// Per-fetch timeout for one candidate.
    pub fetch_timeout: Duration,
    /// Overall deadline for a whole race; should be >= `fetch_timeout`.
    pub race_deadline: Duration,
    /// Formats to race, in stable candidate order.
    pub formats: Vec<ImageFormat>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upstream_base_url: "http://cdn_zipline:3000/u/".to_string(),
            fetch_timeout: Duration::from_secs(10),
            race_deadline: Duration::from_secs(10),
            formats: ImageFormat::ALL.to_vec(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create config with default values.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Build config from the environment, falling back to defaults.
    ///
    /// Recognized variables: `IMGRELAY_PORT`, `IMGRELAY_UPSTREAM_URL`,
    /// `IMGRELAY_FETCH_TIMEOUT_SECS`, `IMGRELAY_RACE_DEADLINE_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("IMGRELAY_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid IMGRELAY_PORT: {port}"))?;
        }
        if let Ok(url) = std::env::var("IMGRELAY_UPSTREAM_URL") {
            config.upstream_base_url = url;
        }
        if let Ok(secs) = std::env::var("IMGRELAY_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid IMGRELAY_FETCH_TIMEOUT_SECS: {secs}"))?;
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Ok(secs) = std::env::var("IMGRELAY_RACE_DEADLINE_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid IMGRELAY_RACE_DEADLINE_SECS: {secs}"))?;
            config.race_deadline = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the upstream base URL.
    #[must_use]
    pub fn with_upstream_base_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_base_url = url.into();
        self
    }

    /// Set the per-fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the overall race deadline.
    #[must_use]
    pub const fn with_race_deadline(mut self, deadline: Duration) -> Self {
        self.race_deadline = deadline;
        self
    }

    /// Set the formats to race.
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<ImageFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the web adapter.
///
/// Holds the per-process services every request shares; each request still
/// runs its own race with its own task set.
pub struct AxumContext {
    /// Builds the candidate set for a validated identifier.
    pub resolver: VariantResolver,
    /// Runs the first-success race over the candidates.
    pub coordinator: RaceCoordinator<ReqwestFetcher>,
}

/// Wire up the fetcher, resolver and coordinator from configuration.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let base_url = Url::parse(&config.upstream_base_url).with_context(|| {
        format!("invalid upstream base URL: {}", config.upstream_base_url)
    })?;

    if config.race_deadline < config.fetch_timeout {
        tracing::warn!(
            race_deadline_secs = config.race_deadline.as_secs(),
            fetch_timeout_secs = config.fetch_timeout.as_secs(),
            "race deadline is shorter than the per-fetch timeout"
        );
    }

    tracing::info!(
        upstream = %base_url,
        formats = ?config.formats,
        fetch_timeout_secs = config.fetch_timeout.as_secs(),
        "bootstrap wired upstream"
    );

    let fetcher = Arc::new(ReqwestFetcher::new(
        &FetcherConfig::new().with_timeout(config.fetch_timeout),
    ));
    let resolver = VariantResolver::new(base_url, config.formats.clone());
    let coordinator = RaceCoordinator::new(fetcher, config.race_deadline);

    Ok(AxumContext {
        resolver,
        coordinator,
    })
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("imgrelay listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_values() {
        let config = ServerConfig::with_defaults();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_base_url, "http://cdn_zipline:3000/u/");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.race_deadline, Duration::from_secs(10));
        assert_eq!(config.formats, ImageFormat::ALL.to_vec());
    }

    #[test]
    fn bootstrap_rejects_malformed_upstream_url() {
        let config = ServerConfig::with_defaults().with_upstream_base_url("not a url");
        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ServerConfig::with_defaults()
            .with_upstream_base_url("http://127.0.0.1:9999/u/")
            .with_fetch_timeout(Duration::from_millis(100))
            .with_race_deadline(Duration::from_millis(500))
            .with_formats(vec![ImageFormat::Png]);

        assert_eq!(config.upstream_base_url, "http://127.0.0.1:9999/u/");
        assert_eq!(config.fetch_timeout, Duration::from_millis(100));
        assert_eq!(config.race_deadline, Duration::from_millis(500));
        assert_eq!(config.formats, vec![ImageFormat::Png]);
    }
}
