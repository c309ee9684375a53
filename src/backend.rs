//! Remote collaborator seams.
//!
//! The repository and the ingestion pipeline only ever talk to these traits.
//! [`crate::http::PriceTrackerHttp`] implements both over REST; anything else
//! (an in-memory fake, a different transport) can be injected through
//! [`crate::client::PriceTrackerClientBuilder`].

use crate::domain::ingest::wire::{ParseRequest, ParsedProduct};
use crate::domain::product::wire::{CreateProductRequest, ProductsResponse, UpdateProductRequest};
use crate::error::HttpError;
use crate::shared::ProductId;
use async_trait::async_trait;

/// CRUD over persisted product records.
///
/// Mutations report only success or failure; response bodies carry no contract.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn fetch_products(&self) -> Result<ProductsResponse, HttpError>;

    async fn create_product(&self, request: &CreateProductRequest) -> Result<(), HttpError>;

    async fn update_product(&self, request: &UpdateProductRequest) -> Result<(), HttpError>;

    async fn delete_product(&self, id: &ProductId) -> Result<(), HttpError>;
}

/// Resolves a marketplace URL into a product snapshot.
#[async_trait]
pub trait ProductParser: Send + Sync {
    async fn parse_product(&self, request: &ParseRequest) -> Result<ParsedProduct, HttpError>;
}
