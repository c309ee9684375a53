//! Add-product form state: app-owned, SDK-provided validation.

use crate::domain::product::ProductDraft;

/// The add-product flow: paste a URL, parse it, confirm a target price.
///
/// Blank URLs and missing or non-numeric targets are stopped here, before any
/// remote call, by [`IngestForm::can_parse`] and [`IngestForm::can_submit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestForm {
    url: String,
    draft: Option<ProductDraft>,
    target_input: String,
}

impl IngestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn can_parse(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Store a parsed draft and pre-fill the target with the suggested price.
    pub fn accept_draft(&mut self, draft: ProductDraft) {
        self.target_input = draft.suggested_target_price().to_string();
        self.draft = Some(draft);
    }

    pub fn draft(&self) -> Option<&ProductDraft> {
        self.draft.as_ref()
    }

    pub fn target_input(&self) -> &str {
        &self.target_input
    }

    pub fn set_target_input(&mut self, input: impl Into<String>) {
        self.target_input = input.into();
    }

    /// The target price as entered, if it is a non-negative whole number.
    pub fn target_price(&self) -> Option<u64> {
        self.target_input.trim().parse().ok()
    }

    pub fn can_submit(&self) -> bool {
        self.draft.is_some() && self.target_price().is_some()
    }

    /// The draft and target to persist, or `None` when the form is incomplete.
    pub fn submission(&self) -> Option<(ProductDraft, u64)> {
        let target = self.target_price()?;
        self.draft.clone().map(|draft| (draft, target))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
