//! # PriceTracker SDK
//!
//! Client-side core for tracking Ozon and Wildberries prices against a target.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Product types, validation, tracked-set state, metrics
//! 2. **Backend seam**: `ProductStore` / `ProductParser` traits for the remote services
//! 3. **HTTP**: `PriceTrackerHttp`, the reqwest implementation of both seams
//! 4. **High-Level Client**: `PriceTrackerClient` owning the session cache, with
//!    nested sub-clients for the repository, optimistic mutations and ingestion
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricetracker_sdk::prelude::*;
//!
//! let client = PriceTrackerClient::builder()
//!     .api_url("https://api.example.com/products")
//!     .parse_url("https://api.example.com/parse-product")
//!     .build()?;
//!
//! client.products().load().await;
//! let draft = client.ingest().parse("https://www.ozon.ru/product/x-123/").await?;
//! client.products().create(draft.clone(), draft.suggested_target_price()).await?;
//! let outcome = client.mutations().toggle_notifications(&id).await?;
//! let metrics = client.metrics().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and environment keys.
pub mod network;

// ── Layer 2: Backend seam ────────────────────────────────────────────────────

/// Traits the repository and ingestion pipeline call remote services through.
pub mod backend;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP backend for both remote services.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `PriceTrackerClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::ProductId;

    // Domain types: product
    pub use crate::domain::product::{
        default_target_price, FieldChange, LoadReport, LoadSource, Marketplace, MutationOutcome,
        PricePoint, Product, ProductDraft, ProductPatch, RejectedRecord, TrackedProducts,
    };

    // Domain types: ingest, metrics
    pub use crate::domain::ingest::IngestForm;
    pub use crate::domain::metrics::Metrics;

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_PARSE_URL};

    // Backend seam
    pub use crate::backend::{ProductParser, ProductStore};

    // Client + sub-clients
    pub use crate::client::{
        IngestClient, MutationsClient, PriceTrackerClient, PriceTrackerClientBuilder,
        ProductsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::PriceTrackerHttp;
}
