//! Ingestion domain: marketplace URL → product draft.

pub mod client;
mod convert;
pub mod form;
pub mod wire;

pub use form::IngestForm;
