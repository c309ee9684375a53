//! Conversion: ParsedProduct → ProductDraft (TryFrom + validation).

use super::wire;
use crate::domain::product::convert::{marketplace, required_name};
use crate::domain::product::{ProductDraft, ValidationError};

impl TryFrom<wire::ParsedProduct> for ProductDraft {
    type Error = ValidationError;

    fn try_from(source: wire::ParsedProduct) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let name = required_name(source.name, &mut errors);
        let marketplace = marketplace(source.marketplace.as_deref(), &mut errors);

        if !errors.is_empty() {
            let label = source
                .article_number
                .unwrap_or_else(|| "<draft>".to_string());
            return Err(ValidationError::Multiple(label, errors));
        }

        Ok(ProductDraft {
            name,
            current_price: source.current_price,
            marketplace,
            image_url: source.image_url.unwrap_or_default(),
            article_number: source.article_number.unwrap_or_default(),
            product_url: source.product_url,
        })
    }
}
