//! Built-in seed set used when the first load of a session fails.

use super::{Marketplace, PricePoint, Product};
use crate::shared::ProductId;

const PLACEHOLDER_IMAGE: &str =
    "https://v3b.fal.media/files/b/tiger/VE2W3iEsEdBTX4cu_Tmko_output.png";

fn history(points: &[(&str, u64)]) -> Vec<PricePoint> {
    points
        .iter()
        .map(|(date, price)| PricePoint {
            date: date.to_string(),
            price: *price,
        })
        .collect()
}

/// Three demo products, so an unreachable backend never yields an empty screen.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::from("1"),
            name: "TWS wireless earbuds".to_string(),
            current_price: 2499,
            target_price: 1999,
            marketplace: Marketplace::Ozon,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            article_number: "123456789".to_string(),
            price_history: history(&[
                ("01.10", 2899),
                ("05.10", 2699),
                ("10.10", 2499),
                ("15.10", 2499),
            ]),
            notifications: true,
            product_url: None,
        },
        Product {
            id: ProductId::from("2"),
            name: "Xiaomi smart watch".to_string(),
            current_price: 4999,
            target_price: 4500,
            marketplace: Marketplace::Wildberries,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            article_number: "987654321".to_string(),
            price_history: history(&[
                ("01.10", 5499),
                ("05.10", 5299),
                ("10.10", 4999),
                ("15.10", 4999),
            ]),
            notifications: true,
            product_url: None,
        },
        Product {
            id: ProductId::from("3"),
            name: "Mi Band fitness tracker".to_string(),
            current_price: 1799,
            target_price: 1500,
            marketplace: Marketplace::Ozon,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            article_number: "456789123".to_string(),
            price_history: history(&[
                ("01.10", 1999),
                ("05.10", 1899),
                ("10.10", 1799),
                ("15.10", 1799),
            ]),
            notifications: false,
            product_url: None,
        },
    ]
}
