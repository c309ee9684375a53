//! Optimistic mutations over the tracked set.
//!
//! A mutation applies its change to the cache at once and then persists it.
//! Remote writes for one product go out one at a time, each carrying the
//! values the service last accepted plus the one field being changed, so a
//! pending change never rides along with another product update. When a
//! write fails the field goes back to its confirmed value, unless a newer
//! change to that field is already staged. The cache lock is released before
//! any remote call; writes for different products run concurrently.

use crate::client::PriceTrackerClient;
use crate::domain::product::FieldChange;
use crate::error::SdkError;
use crate::shared::ProductId;

use async_lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// How an optimistic mutation ended.
#[derive(Debug)]
#[must_use]
pub enum MutationOutcome {
    /// The remote call succeeded; the local change stands.
    Applied,
    /// The remote call failed; the local change was undone.
    RolledBack(SdkError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, MutationOutcome::RolledBack(_))
    }
}

/// One write slot per product id with a remote write queued or in flight.
#[derive(Default)]
pub(crate) struct WriteQueue {
    slots: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl WriteQueue {
    async fn slot(&self, id: &ProductId) -> Arc<Mutex<()>> {
        self.slots.lock().await.entry(id.clone()).or_default().clone()
    }

    async fn release(&self, id: &ProductId, slot: Arc<Mutex<()>>) {
        let mut slots = self.slots.lock().await;
        drop(slot);
        if slots.get(id).is_some_and(|s| Arc::strong_count(s) == 1) {
            slots.remove(id);
        }
    }
}

/// Sub-client for optimistic mutations.
pub struct Mutations<'a> {
    pub(crate) client: &'a PriceTrackerClient,
}

impl<'a> Mutations<'a> {
    /// Flip the notifications flag now, then persist it.
    ///
    /// Returns [`SdkError::NotFound`] without any remote call when `id` is not
    /// tracked.
    pub async fn toggle_notifications(
        &self,
        id: &ProductId,
    ) -> Result<MutationOutcome, SdkError> {
        let (change, revision) = {
            let mut cache = self.client.products.write().await;
            let current = cache
                .get(id)
                .map(|p| p.notifications)
                .ok_or_else(|| SdkError::NotFound(id.to_string()))?;
            let change = FieldChange::Notifications(!current);
            let revision = cache
                .stage(id, change)
                .ok_or_else(|| SdkError::NotFound(id.to_string()))?;
            (change, revision)
        };
        tracing::debug!(id = %id, change = ?change, "Toggled notifications");

        Ok(self.persist(id, change, revision).await)
    }

    /// Change the target price now, then persist it.
    ///
    /// Returns [`SdkError::NotFound`] without any remote call when `id` is not
    /// tracked.
    pub async fn set_target_price(
        &self,
        id: &ProductId,
        target_price: u64,
    ) -> Result<MutationOutcome, SdkError> {
        let change = FieldChange::TargetPrice(target_price);
        let revision = self
            .client
            .products
            .write()
            .await
            .stage(id, change)
            .ok_or_else(|| SdkError::NotFound(id.to_string()))?;
        tracing::debug!(id = %id, target_price, "Target price set");

        Ok(self.persist(id, change, revision).await)
    }

    /// Remove the product now, then delete it remotely.
    ///
    /// On remote failure the product is put back where it was, with the
    /// values the service holds, unless a reload has brought the same id back
    /// in the meantime. An untracked id leaves the cache as it is; the remote
    /// delete is still issued.
    pub async fn delete(&self, id: &ProductId) -> MutationOutcome {
        let removed = self.client.products.write().await.remove(id);
        if removed.is_none() {
            tracing::debug!(id = %id, "Deleting product that is not tracked locally");
        }

        let slot = self.client.writes.slot(id).await;
        let turn = slot.lock().await;
        let result = self.client.products().delete(id).await;
        let outcome = match result {
            Ok(()) => {
                tracing::info!(id = %id, "Product deleted");
                MutationOutcome::Applied
            }
            Err(err) => {
                if let Some((index, product)) = removed {
                    if !self.client.products.write().await.restore(index, product) {
                        tracing::debug!(id = %id, "Product reappeared before rollback");
                    }
                }
                tracing::warn!(id = %id, error = %err, "Product delete rolled back");
                MutationOutcome::RolledBack(err)
            }
        };
        drop(turn);
        self.client.writes.release(id, slot).await;
        outcome
    }

    /// Wait for the product's write slot, then send the staged change.
    async fn persist(&self, id: &ProductId, change: FieldChange, revision: u64) -> MutationOutcome {
        let slot = self.client.writes.slot(id).await;
        let turn = slot.lock().await;
        let outcome = self.send(id, change, revision).await;
        drop(turn);
        self.client.writes.release(id, slot).await;
        outcome
    }

    async fn send(&self, id: &ProductId, change: FieldChange, revision: u64) -> MutationOutcome {
        let patch = self.client.products.read().await.patch_for(id, change);
        let Some(patch) = patch else {
            tracing::debug!(id = %id, "Product left the tracked set before its update");
            return MutationOutcome::RolledBack(SdkError::NotFound(id.to_string()));
        };

        match self.client.products().update(id, patch).await {
            Ok(()) => {
                self.client
                    .products
                    .write()
                    .await
                    .confirm(id, change, revision);
                MutationOutcome::Applied
            }
            Err(err) => {
                let restored = self
                    .client
                    .products
                    .write()
                    .await
                    .reject(id, change, revision);
                tracing::warn!(
                    id = %id,
                    change = ?change,
                    restored,
                    error = %err,
                    "Product update rolled back"
                );
                MutationOutcome::RolledBack(err)
            }
        }
    }
}
