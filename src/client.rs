//! High-level client: `PriceTrackerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the session cache, and accessor methods.

use crate::backend::{ProductParser, ProductStore};
use crate::domain::ingest::client::Ingest;
use crate::domain::metrics::Metrics;
use crate::domain::product::client::Products;
use crate::domain::product::mutation::{Mutations, WriteQueue};
use crate::domain::product::{seed, Product, TrackedProducts};
use crate::error::SdkError;
#[cfg(feature = "http")]
use crate::http::PriceTrackerHttp;

use async_lock::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::ingest::client::Ingest as IngestClient;
pub use crate::domain::product::client::Products as ProductsClient;
pub use crate::domain::product::mutation::Mutations as MutationsClient;

/// The primary entry point for the PriceTracker SDK.
///
/// One instance is one user session: it owns the tracked set for as long as
/// it lives. Clones share the same session.
pub struct PriceTrackerClient {
    pub(crate) store: Arc<dyn ProductStore>,
    pub(crate) parser: Arc<dyn ProductParser>,
    /// The tracked set. Never locked across a remote call.
    pub(crate) products: Arc<RwLock<TrackedProducts>>,
    /// Set once a load has succeeded; from then on the cache is the
    /// last-known-good fallback.
    pub(crate) synced: Arc<AtomicBool>,
    /// Used when a load fails before any load has succeeded.
    pub(crate) seed: Arc<Vec<Product>>,
    /// Orders remote writes per product.
    pub(crate) writes: Arc<WriteQueue>,
}

impl PriceTrackerClient {
    pub fn builder() -> PriceTrackerClientBuilder {
        PriceTrackerClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    /// The product repository: load, create, update, delete.
    pub fn products(&self) -> Products<'_> {
        Products { client: self }
    }

    /// Optimistic mutations over the tracked set.
    pub fn mutations(&self) -> Mutations<'_> {
        Mutations { client: self }
    }

    /// URL → draft ingestion.
    pub fn ingest(&self) -> Ingest<'_> {
        Ingest { client: self }
    }

    /// Metrics over the tracked set as it is right now.
    pub async fn metrics(&self) -> Metrics {
        Metrics::derive(self.products.read().await.as_slice())
    }

    /// True once a load has reached the persistence service.
    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    /// Drop the tracked set and forget the last sync, as at session start.
    pub async fn reset(&self) {
        self.products.write().await.clear();
        self.synced.store(false, Ordering::Release);
    }
}

impl Clone for PriceTrackerClient {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            parser: self.parser.clone(),
            products: self.products.clone(),
            synced: self.synced.clone(),
            seed: self.seed.clone(),
            writes: self.writes.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PriceTrackerClientBuilder {
    api_url: String,
    parse_url: String,
    timeout: Duration,
    seed: Vec<Product>,
    store: Option<Arc<dyn ProductStore>>,
    parser: Option<Arc<dyn ProductParser>>,
}

impl Default for PriceTrackerClientBuilder {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            parse_url: crate::network::DEFAULT_PARSE_URL.to_string(),
            timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            seed: seed::demo_products(),
            store: None,
            parser: None,
        }
    }
}

impl PriceTrackerClientBuilder {
    /// Start from the defaults, overridden by `PRICETRACKER_*` environment variables.
    pub fn from_env() -> Self {
        use crate::network::{ENV_API_URL, ENV_PARSE_URL, ENV_TIMEOUT_SECS};

        let mut builder = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            builder.api_url = url;
        }
        if let Ok(url) = std::env::var(ENV_PARSE_URL) {
            builder.parse_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => builder.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        builder
    }

    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn parse_url(mut self, url: &str) -> Self {
        self.parse_url = url.to_string();
        self
    }

    /// Per-request timeout; a request without a response by then has failed.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Products shown when the very first load fails.
    pub fn seed(mut self, products: Vec<Product>) -> Self {
        self.seed = products;
        self
    }

    /// Use a custom persistence backend instead of HTTP.
    pub fn store(mut self, store: Arc<dyn ProductStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a custom parsing backend instead of HTTP.
    pub fn parser(mut self, parser: Arc<dyn ProductParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn build(self) -> Result<PriceTrackerClient, SdkError> {
        let (store, parser) = match (self.store, self.parser) {
            (Some(store), Some(parser)) => (store, parser),
            #[cfg(feature = "http")]
            (store, parser) => {
                let http = Arc::new(PriceTrackerHttp::with_timeout(
                    &self.api_url,
                    &self.parse_url,
                    self.timeout,
                )?);
                (
                    store.unwrap_or_else(|| http.clone() as Arc<dyn ProductStore>),
                    parser.unwrap_or_else(|| http as Arc<dyn ProductParser>),
                )
            }
            #[cfg(not(feature = "http"))]
            _ => {
                return Err(SdkError::Other(
                    "both a store and a parser are required without the `http` feature"
                        .to_string(),
                ))
            }
        };

        Ok(PriceTrackerClient {
            store,
            parser,
            products: Arc::new(RwLock::new(TrackedProducts::new())),
            synced: Arc::new(AtomicBool::new(false)),
            seed: Arc::new(self.seed),
            writes: Arc::new(WriteQueue::default()),
        })
    }
}
