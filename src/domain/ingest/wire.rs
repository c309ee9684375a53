//! Wire types for the parsing service (REST).

use serde::{Deserialize, Serialize};

/// Parsing service request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseRequest {
    pub url: String,
}

/// Raw product snapshot returned by the parsing service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProduct {
    #[serde(default)]
    pub name: Option<String>,
    pub current_price: u64,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub article_number: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Error body the parsing service sends with a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Pull the service's message out of a raw error body, if it has one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
    }
}
