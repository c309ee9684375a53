//! Products sub-client: the repository over the persistence service.
//!
//! Every remote call made on behalf of the tracked set goes through here.
//! Nothing retries; a failed call is terminal for that action.

use crate::client::PriceTrackerClient;
use crate::domain::product::wire::{CreateProductRequest, UpdateProductRequest};
use crate::domain::product::{Product, ProductDraft, ProductPatch};
use crate::error::SdkError;
use crate::shared::ProductId;
use std::sync::atomic::Ordering;

/// Where the products of a load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Fresh from the persistence service.
    Remote,
    /// The service failed; the previous cache was kept.
    LastKnownGood,
    /// The service failed before any load succeeded; the seed set was used.
    Seed,
}

/// A record from the persistence service that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: Option<ProductId>,
    pub reason: String,
}

/// Outcome of [`Products::load_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub products: Vec<Product>,
    pub source: LoadSource,
    /// Records dropped from a remote load, including duplicate ids.
    pub rejected: Vec<RejectedRecord>,
}

/// Sub-client for the tracked product set.
pub struct Products<'a> {
    pub(crate) client: &'a PriceTrackerClient,
}

impl<'a> Products<'a> {
    /// Reload the tracked set, replacing the cache wholesale.
    ///
    /// Never fails: on a transport or format error the last-known-good set
    /// (or the seed set, before the first successful load) is returned.
    pub async fn load(&self) -> Vec<Product> {
        self.load_report().await.products
    }

    /// Like [`Products::load`], but reports where the data came from and
    /// which records were dropped.
    pub async fn load_report(&self) -> LoadReport {
        match self.client.store.fetch_products().await {
            Ok(resp) => {
                let mut rejected = Vec::new();
                let mut products = Vec::with_capacity(resp.products.len());
                for record in resp.products {
                    let id = record.id.clone();
                    match Product::try_from(record) {
                        Ok(product) => products.push(product),
                        Err(err) => {
                            tracing::warn!(id = ?id, error = %err, "Dropping invalid product record");
                            rejected.push(RejectedRecord {
                                id,
                                reason: err.to_string(),
                            });
                        }
                    }
                }

                let products = {
                    let mut cache = self.client.products.write().await;
                    for dup in cache.replace_all(products) {
                        tracing::warn!(id = %dup.id, "Dropping duplicate product id");
                        rejected.push(RejectedRecord {
                            id: Some(dup.id),
                            reason: "duplicate id".to_string(),
                        });
                    }
                    cache.to_vec()
                };
                self.client.synced.store(true, Ordering::Release);
                tracing::info!(count = products.len(), rejected = rejected.len(), "Loaded products");

                LoadReport {
                    products,
                    source: LoadSource::Remote,
                    rejected,
                }
            }
            Err(err) => {
                let mut cache = self.client.products.write().await;
                let source = if self.client.synced.load(Ordering::Acquire) {
                    LoadSource::LastKnownGood
                } else {
                    cache.replace_all(self.client.seed.as_ref().clone());
                    LoadSource::Seed
                };
                tracing::warn!(error = %err, source = ?source, "Product load failed, using fallback");

                LoadReport {
                    products: cache.to_vec(),
                    source,
                    rejected: Vec::new(),
                }
            }
        }
    }

    /// Persist a draft with the chosen target price and notifications on,
    /// then reload to pick up the server-assigned fields.
    ///
    /// On failure the cache is left untouched and the error is returned.
    pub async fn create(
        &self,
        draft: ProductDraft,
        target_price: u64,
    ) -> Result<Vec<Product>, SdkError> {
        let request = CreateProductRequest {
            draft,
            target_price,
            notifications: true,
        };
        if let Err(err) = self.client.store.create_product(&request).await {
            tracing::warn!(error = %err, name = %request.draft.name, "Create product failed");
            return Err(err.into());
        }
        tracing::info!(name = %request.draft.name, target_price, "Product created");
        Ok(self.load().await)
    }

    /// Send a partial update. Does not touch the cache; see
    /// [`crate::domain::product::mutation::Mutations`] for the optimistic path.
    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<(), SdkError> {
        let request = UpdateProductRequest {
            id: id.clone(),
            notifications: patch.notifications,
            target_price: patch.target_price,
        };
        self.client.store.update_product(&request).await?;
        Ok(())
    }

    /// Request removal by id. Does not touch the cache.
    pub async fn delete(&self, id: &ProductId) -> Result<(), SdkError> {
        self.client.store.delete_product(id).await?;
        Ok(())
    }

    // ── Cache reads ──────────────────────────────────────────────────────

    /// Snapshot of the tracked set.
    pub async fn list(&self) -> Vec<Product> {
        self.client.products.read().await.to_vec()
    }

    pub async fn get(&self, id: &ProductId) -> Option<Product> {
        self.client.products.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.client.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.client.products.read().await.is_empty()
    }
}
