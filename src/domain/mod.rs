//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching backend payloads
//! - `convert.rs`: `TryFrom` conversions with validation
//! - `state.rs` / `form.rs`: App-owned state with SDK-provided update methods
//! - `client.rs`: Sub-client with remote calls and cache reconciliation

pub mod ingest;
pub mod metrics;
pub mod product;
