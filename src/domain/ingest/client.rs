//! Ingest sub-client: resolve a pasted URL into a draft, then persist it.

use crate::client::PriceTrackerClient;
use crate::domain::ingest::wire::{ErrorResponse, ParseRequest};
use crate::domain::ingest::IngestForm;
use crate::domain::product::{Product, ProductDraft};
use crate::error::{HttpError, SdkError};

/// Sub-client for the ingestion pipeline.
pub struct Ingest<'a> {
    pub(crate) client: &'a PriceTrackerClient,
}

impl<'a> Ingest<'a> {
    /// Ask the parsing service for a snapshot of the product at `url`.
    ///
    /// A blank `url` is rejected with [`SdkError::Validation`] before any
    /// network call. Every other failure, including a snapshot that does not
    /// validate, is [`SdkError::Unresolved`]; no partial draft is returned.
    /// Results are not cached.
    pub async fn parse(&self, url: &str) -> Result<ProductDraft, SdkError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SdkError::Validation("product URL is empty".to_string()));
        }

        let request = ParseRequest {
            url: url.to_string(),
        };
        let parsed = self
            .client
            .parser
            .parse_product(&request)
            .await
            .map_err(|err| {
                tracing::warn!(url, error = %err, "Parse request failed");
                unresolved(url, reason_for(&err))
            })?;

        let draft = ProductDraft::try_from(parsed).map_err(|err| {
            tracing::warn!(url, error = %err, "Parsed product failed validation");
            unresolved(url, err.to_string())
        })?;

        tracing::debug!(
            url,
            marketplace = %draft.marketplace,
            current_price = draft.current_price,
            "Parsed product"
        );
        Ok(draft)
    }

    /// Parse the form's URL and load the draft into it.
    ///
    /// Does nothing when the URL is blank. On failure the form keeps whatever
    /// draft it had.
    pub async fn parse_into(&self, form: &mut IngestForm) -> Result<(), SdkError> {
        if !form.can_parse() {
            return Ok(());
        }
        let draft = self.parse(form.url()).await?;
        form.accept_draft(draft);
        Ok(())
    }

    /// Persist the form's draft with its target price and reset the form.
    ///
    /// Returns `Ok(None)` without any remote call when the form is incomplete.
    /// On failure the form is left as it was so the user can retry.
    pub async fn submit(&self, form: &mut IngestForm) -> Result<Option<Vec<Product>>, SdkError> {
        let Some((draft, target_price)) = form.submission() else {
            return Ok(None);
        };
        let products = self.client.products().create(draft, target_price).await?;
        form.reset();
        Ok(Some(products))
    }
}

fn unresolved(url: &str, reason: String) -> SdkError {
    SdkError::Unresolved {
        url: url.to_string(),
        reason,
    }
}

fn reason_for(err: &HttpError) -> String {
    match err {
        HttpError::BadRequest(body) | HttpError::NotFound(body) => {
            ErrorResponse::message_from(body).unwrap_or_else(|| err.to_string())
        }
        _ => err.to_string(),
    }
}
