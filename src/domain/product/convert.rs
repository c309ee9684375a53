//! Conversions: wire records → Product (TryFrom + validation).

use super::wire;
use super::{Marketplace, Product, ValidationError};
use crate::shared::ProductId;

pub(crate) fn required_name(name: Option<String>, errors: &mut Vec<ValidationError>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            errors.push(ValidationError::MissingName);
            String::new()
        }
    }
}

pub(crate) fn marketplace(raw: Option<&str>, errors: &mut Vec<ValidationError>) -> Marketplace {
    let Some(raw) = raw else {
        errors.push(ValidationError::MissingMarketplace);
        return Marketplace::Ozon;
    };
    raw.parse().unwrap_or_else(|err| {
        errors.push(err);
        Marketplace::Ozon
    })
}

impl TryFrom<wire::ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(source: wire::ProductRecord) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let label = source
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<no id>".to_string());

        let id = source.id.unwrap_or_else(|| {
            errors.push(ValidationError::MissingId);
            ProductId::new("")
        });
        let name = required_name(source.name, &mut errors);
        let marketplace = marketplace(source.marketplace.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(label, errors));
        }

        Ok(Product {
            id,
            name,
            current_price: source.current_price,
            target_price: source.target_price,
            marketplace,
            image_url: source.image_url.unwrap_or_default(),
            article_number: source.article_number.unwrap_or_default(),
            price_history: source.price_history,
            notifications: source.notifications,
            product_url: source.product_url,
        })
    }
}
