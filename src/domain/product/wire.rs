//! Wire types for the persistence service (REST).

use super::{PricePoint, ProductDraft};
use crate::shared::ProductId;
use serde::{Deserialize, Serialize};

// ─── Persistence: reads ─────────────────────────────────────────────────────

/// Raw product record as returned by `GET`.
///
/// Fields the client validates (`marketplace`, `name`) stay loosely typed here
/// so a single bad record can be rejected without failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    pub current_price: u64,
    pub target_price: u64,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub article_number: Option<String>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub product_url: Option<String>,
}

/// `GET` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductsResponse {
    pub products: Vec<ProductRecord>,
}

// ─── Persistence: writes ────────────────────────────────────────────────────

/// `POST` body: a draft plus the chosen target and the notifications flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(flatten)]
    pub draft: ProductDraft,
    pub target_price: u64,
    pub notifications: bool,
}

/// `PUT` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: ProductId,
    pub notifications: bool,
    pub target_price: u64,
}
