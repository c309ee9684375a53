//! Low-level HTTP client: `PriceTrackerHttp`.
//!
//! One method per remote endpoint. Returns wire types (conversion to domain
//! types happens in the sub-clients). Implements the [`crate::backend`] traits
//! so the high-level client can use it as its default backend. Every request
//! is sent once; a failure goes straight back to the caller.

use crate::backend::{ProductParser, ProductStore};
use crate::domain::ingest::wire::{ParseRequest, ParsedProduct};
use crate::domain::product::wire::{CreateProductRequest, ProductsResponse, UpdateProductRequest};
use crate::error::HttpError;
use crate::shared::ProductId;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Low-level HTTP client for the persistence and parsing services.
#[derive(Clone)]
pub struct PriceTrackerHttp {
    api_url: String,
    parse_url: String,
    client: Client,
}

impl PriceTrackerHttp {
    pub fn new(api_url: &str, parse_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(
            api_url,
            parse_url,
            Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Build a client whose requests fail with [`HttpError::Timeout`] after `timeout`.
    pub fn with_timeout(
        api_url: &str,
        parse_url: &str,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            parse_url: parse_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    // ── Products ─────────────────────────────────────────────────────────

    pub async fn get_products(&self) -> Result<ProductsResponse, HttpError> {
        self.get(&self.api_url).await
    }

    pub async fn post_product(&self, request: &CreateProductRequest) -> Result<(), HttpError> {
        self.send(reqwest::Method::POST, &self.api_url, Some(request))
            .await
    }

    pub async fn put_product(&self, request: &UpdateProductRequest) -> Result<(), HttpError> {
        self.send(reqwest::Method::PUT, &self.api_url, Some(request))
            .await
    }

    pub async fn delete_product_by_id(&self, id: &ProductId) -> Result<(), HttpError> {
        let url = format!(
            "{}?id={}",
            self.api_url,
            urlencoding::encode(id.as_str())
        );
        self.send(reqwest::Method::DELETE, &url, None::<&()>).await
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    pub async fn post_parse(&self, request: &ParseRequest) -> Result<ParsedProduct, HttpError> {
        self.post(&self.parse_url, request).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.do_request(&reqwest::Method::GET, url, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.do_request(&reqwest::Method::POST, url, Some(body)).await
    }

    /// Fire a mutation; any 2xx is success and the body is discarded.
    async fn send<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(), HttpError> {
        self.execute(&method, url, body).await.map(|_| ())
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let resp = self.execute(method, url, body).await?;
        resp.json::<T>().await.map_err(transport_error)
    }

    async fn execute<B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(method = %method, url, "Sending request");
        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        tracing::debug!(method = %method, url, status = status_code, "Request rejected");

        Err(status_error(status_code, body_text, retry_after_ms))
    }
}

fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

#[async_trait]
impl ProductStore for PriceTrackerHttp {
    async fn fetch_products(&self) -> Result<ProductsResponse, HttpError> {
        self.get_products().await
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<(), HttpError> {
        self.post_product(request).await
    }

    async fn update_product(&self, request: &UpdateProductRequest) -> Result<(), HttpError> {
        self.put_product(request).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), HttpError> {
        self.delete_product_by_id(id).await
    }
}

#[async_trait]
impl ProductParser for PriceTrackerHttp {
    async fn parse_product(&self, request: &ParseRequest) -> Result<ParsedProduct, HttpError> {
        self.post_parse(request).await
    }
}
