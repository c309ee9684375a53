//! Metrics domain: aggregate statistics over the tracked set.

use crate::domain::product::Product;
use serde::{Deserialize, Serialize};

/// Dashboard numbers for a tracked set. Recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_products: usize,
    /// Mean of `max(0, target - current)` across all products, rounded half up.
    /// Products priced at or above their target contribute 0, never a negative amount.
    pub average_savings: u64,
    pub active_notifications: usize,
    pub targets_reached: usize,
}

impl Metrics {
    pub fn derive(products: &[Product]) -> Self {
        let total_products = products.len();
        if total_products == 0 {
            return Self::default();
        }

        let total_savings: u128 = products.iter().map(|p| u128::from(p.savings())).sum();
        let count = total_products as u128;
        let average_savings = ((total_savings * 2 + count) / (count * 2)) as u64;

        Self {
            total_products,
            average_savings,
            active_notifications: products.iter().filter(|p| p.notifications).count(),
            targets_reached: products.iter().filter(|p| p.target_reached()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Marketplace;
    use crate::shared::ProductId;

    fn product(id: &str, current: u64, target: u64, notifications: bool) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_string(),
            current_price: current,
            target_price: target,
            marketplace: Marketplace::Ozon,
            image_url: String::new(),
            article_number: id.to_string(),
            price_history: vec![],
            notifications,
            product_url: None,
        }
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        assert_eq!(Metrics::derive(&[]), Metrics::default());
        assert_eq!(Metrics::derive(&[]).average_savings, 0);
    }

    #[test]
    fn test_prices_above_target_contribute_nothing() {
        let products = vec![
            product("1", 2499, 1999, true),
            product("2", 4999, 4500, true),
            product("3", 1799, 1500, false),
        ];
        let m = Metrics::derive(&products);
        assert_eq!(m.total_products, 3);
        assert_eq!(m.average_savings, 0);
        assert_eq!(m.active_notifications, 2);
        assert_eq!(m.targets_reached, 0);
    }

    #[test]
    fn test_average_savings_rounds_half_up() {
        // (100 + 0 + 1) / 3 = 33.67 → 34
        let products = vec![
            product("1", 900, 1000, true),
            product("2", 1000, 900, true),
            product("3", 99, 100, true),
        ];
        assert_eq!(Metrics::derive(&products).average_savings, 34);

        // (1 + 0) / 2 = 0.5 → 1
        let products = vec![product("1", 9, 10, false), product("2", 10, 10, false)];
        let m = Metrics::derive(&products);
        assert_eq!(m.average_savings, 1);
        assert_eq!(m.targets_reached, 2);
        assert_eq!(m.active_notifications, 0);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let products = vec![product("1", 500, 800, true), product("2", 700, 650, false)];
        assert_eq!(Metrics::derive(&products), Metrics::derive(&products));
        assert_eq!(Metrics::derive(&products).average_savings, 150);
    }
}
