//! Tracked product state: the session's in-memory copy of the tracked set.

use super::{FieldChange, Product, ProductPatch};
use crate::shared::ProductId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Notifications,
    TargetPrice,
}

impl From<FieldChange> for Field {
    fn from(change: FieldChange) -> Self {
        match change {
            FieldChange::Notifications(_) => Field::Notifications,
            FieldChange::TargetPrice(_) => Field::TargetPrice,
        }
    }
}

/// Ordered set of tracked products, unique by id.
///
/// Order is the server's (newest first) and is preserved across local
/// mutations so rollbacks put entities back where they were.
///
/// Next to the optimistic copy the set keeps the mutable fields as the
/// persistence service last accepted them. Remote updates are built from
/// that copy, and a failed change falls back to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedProducts {
    products: Vec<Product>,
    confirmed: HashMap<ProductId, ProductPatch>,
    /// Latest staged change per field. Older changes neither roll back nor
    /// overwrite the local value.
    revisions: HashMap<(ProductId, Field), u64>,
    next_revision: u64,
}

impl TrackedProducts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set. Later duplicates of an id are dropped and returned.
    ///
    /// The new set counts as confirmed; changes staged before the call no
    /// longer touch the local copy.
    pub fn replace_all(&mut self, products: Vec<Product>) -> Vec<Product> {
        let mut kept: Vec<Product> = Vec::with_capacity(products.len());
        let mut duplicates = Vec::new();
        for product in products {
            if kept.iter().any(|p| p.id == product.id) {
                duplicates.push(product);
            } else {
                kept.push(product);
            }
        }
        self.confirmed = kept
            .iter()
            .map(|p| (p.id.clone(), ProductPatch::from(p)))
            .collect();
        self.revisions.clear();
        self.products = kept;
        duplicates
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn to_vec(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The last values the persistence service accepted for `id`.
    pub fn confirmed(&self, id: &ProductId) -> Option<ProductPatch> {
        self.confirmed.get(id).copied()
    }

    /// Apply `change` locally ahead of the server and return its revision.
    pub fn stage(&mut self, id: &ProductId, change: FieldChange) -> Option<u64> {
        let product = self.products.iter_mut().find(|p| &p.id == id)?;
        change.apply_to(product);
        self.next_revision += 1;
        self.revisions
            .insert((id.clone(), Field::from(change)), self.next_revision);
        Some(self.next_revision)
    }

    /// The full update to send for `change`: confirmed values with that one
    /// field replaced.
    pub fn patch_for(&self, id: &ProductId, change: FieldChange) -> Option<ProductPatch> {
        self.confirmed(id)
            .or_else(|| self.get(id).map(ProductPatch::from))
            .map(|patch| patch.with(change))
    }

    /// Record that the server accepted `change`.
    pub fn confirm(&mut self, id: &ProductId, change: FieldChange, revision: u64) {
        if let Some(patch) = self.confirmed.get_mut(id) {
            *patch = patch.with(change);
        }
        let key = (id.clone(), Field::from(change));
        let superseded = self
            .revisions
            .get(&key)
            .is_some_and(|&latest| latest != revision);
        if !superseded {
            self.revisions.remove(&key);
            if let Some(product) = self.get_mut(id) {
                change.apply_to(product);
            }
        }
    }

    /// Record that the server refused `change`. Puts the confirmed value back
    /// unless a later change to the same field is staged; returns whether it did.
    pub fn reject(&mut self, id: &ProductId, change: FieldChange, revision: u64) -> bool {
        let key = (id.clone(), Field::from(change));
        if self.revisions.get(&key) != Some(&revision) {
            return false;
        }
        self.revisions.remove(&key);
        let Some(confirmed) = self.confirmed(id) else {
            return false;
        };
        let restore = match change {
            FieldChange::Notifications(_) => FieldChange::Notifications(confirmed.notifications),
            FieldChange::TargetPrice(_) => FieldChange::TargetPrice(confirmed.target_price),
        };
        match self.get_mut(id) {
            Some(product) => {
                restore.apply_to(product);
                true
            }
            None => false,
        }
    }

    /// Remove by id, returning the entity and the position it held.
    pub fn remove(&mut self, id: &ProductId) -> Option<(usize, Product)> {
        let index = self.products.iter().position(|p| &p.id == id)?;
        Some((index, self.products.remove(index)))
    }

    /// Put a removed entity back with its confirmed field values. A no-op
    /// (returning false) if the id is present again; the index is clamped to
    /// the current length.
    pub fn restore(&mut self, index: usize, mut product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        if let Some(confirmed) = self.confirmed(&product.id) {
            product.notifications = confirmed.notifications;
            product.target_price = confirmed.target_price;
        }
        let index = index.min(self.products.len());
        self.products.insert(index, product);
        true
    }

    pub fn clear(&mut self) {
        self.products.clear();
        self.confirmed.clear();
        self.revisions.clear();
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| &p.id == id)
    }
}
