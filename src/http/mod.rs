//! HTTP layer: `PriceTrackerHttp` over the persistence and parsing services.

pub mod client;

pub use client::PriceTrackerHttp;
