//! Network URL constants and environment keys for the PriceTracker SDK.

/// Default persistence service URL (products CRUD).
pub const DEFAULT_API_URL: &str = "http://localhost:8080/products";

/// Default parsing service URL (URL → product snapshot).
pub const DEFAULT_PARSE_URL: &str = "http://localhost:8080/parse-product";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const ENV_API_URL: &str = "PRICETRACKER_API_URL";

/// Environment variable overriding [`DEFAULT_PARSE_URL`].
pub const ENV_PARSE_URL: &str = "PRICETRACKER_PARSE_URL";

/// Environment variable overriding [`DEFAULT_TIMEOUT_SECS`].
pub const ENV_TIMEOUT_SECS: &str = "PRICETRACKER_TIMEOUT_SECS";
