//! Product domain: tracked products, drafts, validation, conversion.

pub mod client;
pub(crate) mod convert;
pub mod mutation;
pub mod seed;
pub mod state;
pub mod wire;

use crate::shared::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use client::{LoadReport, LoadSource, RejectedRecord};
pub use mutation::MutationOutcome;
pub use state::TrackedProducts;

// ─── Marketplace ─────────────────────────────────────────────────────────────

/// Supported marketplaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Ozon,
    Wildberries,
}

impl Marketplace {
    pub fn as_str(&self) -> &str {
        match self {
            Marketplace::Ozon => "ozon",
            Marketplace::Wildberries => "wildberries",
        }
    }
}

impl FromStr for Marketplace {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ozon" => Ok(Marketplace::Ozon),
            "wildberries" => Ok(Marketplace::Wildberries),
            other => Err(ValidationError::UnknownMarketplace(other.to_string())),
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marketplace::Ozon => write!(f, "Ozon"),
            Marketplace::Wildberries => write!(f, "Wildberries"),
        }
    }
}

// ─── PricePoint ──────────────────────────────────────────────────────────────

/// A single point on a product's price chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Display label (`dd.mm`), not a parseable timestamp.
    pub date: String,
    pub price: u64,
}

// ─── Product ─────────────────────────────────────────────────────────────────

/// A persisted, validated product tracked by the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub current_price: u64,
    pub target_price: u64,
    pub marketplace: Marketplace,
    pub image_url: String,
    pub article_number: String,
    pub price_history: Vec<PricePoint>,
    pub notifications: bool,
    pub product_url: Option<String>,
}

impl Product {
    /// True once the current price has reached or undercut the target.
    pub fn target_reached(&self) -> bool {
        self.current_price <= self.target_price
    }

    /// How far the target sits above the current price, or 0.
    pub fn savings(&self) -> u64 {
        self.target_price.saturating_sub(self.current_price)
    }
}

// ─── ProductDraft ────────────────────────────────────────────────────────────

/// A product snapshot produced by ingestion, not yet persisted.
///
/// Lacks everything the persistence service assigns: `id`, `notifications`
/// and the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub current_price: u64,
    pub marketplace: Marketplace,
    pub image_url: String,
    pub article_number: String,
    pub product_url: Option<String>,
}

impl ProductDraft {
    /// Default target offered to the user: a 10% discount off the current price.
    pub fn suggested_target_price(&self) -> u64 {
        default_target_price(self.current_price)
    }
}

/// `round(price * 0.9)`, rounding halves up, computed without floats.
pub fn default_target_price(current_price: u64) -> u64 {
    let scaled = u128::from(current_price) * 9 + 5;
    (scaled / 10) as u64
}

// ─── ProductPatch ────────────────────────────────────────────────────────────

/// The mutable subset of a product sent with an update.
///
/// The persistence service overwrites both columns on every update, so a
/// patch always carries both values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPatch {
    pub notifications: bool,
    pub target_price: u64,
}

impl ProductPatch {
    /// This patch with one field replaced.
    pub fn with(mut self, change: FieldChange) -> Self {
        match change {
            FieldChange::Notifications(value) => self.notifications = value,
            FieldChange::TargetPrice(value) => self.target_price = value,
        }
        self
    }
}

impl From<&Product> for ProductPatch {
    fn from(product: &Product) -> Self {
        Self {
            notifications: product.notifications,
            target_price: product.target_price,
        }
    }
}

/// A single-field change made by an optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Notifications(bool),
    TargetPrice(u64),
}

impl FieldChange {
    pub(crate) fn apply_to(&self, product: &mut Product) {
        match *self {
            FieldChange::Notifications(value) => product.notifications = value,
            FieldChange::TargetPrice(value) => product.target_price = value,
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingName,
    MissingMarketplace,
    UnknownMarketplace(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Product validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingMarketplace => write!(f, "Missing marketplace"),
            ValidationError::UnknownMarketplace(value) => {
                write!(f, "Unknown marketplace: {value:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
