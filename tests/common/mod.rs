//! In-memory stand-ins for the persistence and parsing services.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pricetracker_sdk::backend::{ProductParser, ProductStore};
use pricetracker_sdk::client::PriceTrackerClient;
use pricetracker_sdk::domain::ingest::wire::{ParseRequest, ParsedProduct};
use pricetracker_sdk::domain::product::wire::{
    CreateProductRequest, ProductRecord, ProductsResponse, UpdateProductRequest,
};
use pricetracker_sdk::domain::product::PricePoint;
use pricetracker_sdk::error::HttpError;
use pricetracker_sdk::shared::ProductId;
use tokio::sync::{oneshot, Notify};

fn unavailable() -> HttpError {
    HttpError::ServerError {
        status: 503,
        body: "unavailable".to_string(),
    }
}

pub fn record(id: &str, current: u64, target: u64, notifications: bool) -> ProductRecord {
    ProductRecord {
        id: Some(ProductId::from(id)),
        name: Some(format!("Product {id}")),
        current_price: current,
        target_price: target,
        marketplace: Some("ozon".to_string()),
        image_url: Some(format!("https://example.com/{id}.png")),
        article_number: Some(format!("{id}000")),
        price_history: vec![PricePoint {
            date: "01.10".to_string(),
            price: current,
        }],
        notifications,
        product_url: None,
    }
}

/// Persistence service fake. Mutations change `records` only when they succeed.
#[derive(Default)]
pub struct FakeStore {
    pub records: Mutex<Vec<ProductRecord>>,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub creates: Mutex<Vec<CreateProductRequest>>,
    pub updates: Mutex<Vec<UpdateProductRequest>>,
    pub deletes: Mutex<Vec<ProductId>>,
    next_id: AtomicUsize,
    held_update: Mutex<Option<oneshot::Receiver<()>>>,
    /// Notified when a held update reaches the store.
    pub update_entered: Notify,
}

impl FakeStore {
    pub fn with_records(records: Vec<ProductRecord>) -> Arc<Self> {
        let store = Self::default();
        store.next_id.store(100, Ordering::SeqCst);
        *store.records.lock().unwrap() = records;
        Arc::new(store)
    }

    /// The next update parks until `release` fires, then fails.
    pub fn hold_next_update(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.held_update.lock().unwrap() = Some(rx);
        tx
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn record(&self, id: &str) -> Option<ProductRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_ref().map(|i| i.as_str()) == Some(id))
            .cloned()
    }
}

#[async_trait]
impl ProductStore for FakeStore {
    async fn fetch_products(&self) -> Result<ProductsResponse, HttpError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(ProductsResponse {
            products: self.records.lock().unwrap().clone(),
        })
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<(), HttpError> {
        self.creates.lock().unwrap().push(request.clone());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let draft = &request.draft;
        self.records.lock().unwrap().insert(
            0,
            ProductRecord {
                id: Some(ProductId::new(id.to_string())),
                name: Some(draft.name.clone()),
                current_price: draft.current_price,
                target_price: request.target_price,
                marketplace: Some(draft.marketplace.as_str().to_string()),
                image_url: Some(draft.image_url.clone()),
                article_number: Some(draft.article_number.clone()),
                price_history: vec![PricePoint {
                    date: "18.10".to_string(),
                    price: draft.current_price,
                }],
                notifications: request.notifications,
                product_url: draft.product_url.clone(),
            },
        );
        Ok(())
    }

    async fn update_product(&self, request: &UpdateProductRequest) -> Result<(), HttpError> {
        self.updates.lock().unwrap().push(request.clone());
        let held = self.held_update.lock().unwrap().take();
        if let Some(release) = held {
            self.update_entered.notify_one();
            let _ = release.await;
            return Err(unavailable());
        }
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id.as_ref() == Some(&request.id)) {
            r.notifications = request.notifications;
            r.target_price = request.target_price;
        }
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), HttpError> {
        self.deletes.lock().unwrap().push(id.clone());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.records
            .lock()
            .unwrap()
            .retain(|r| r.id.as_ref() != Some(id));
        Ok(())
    }
}

/// Parsing service fake returning a fixed response.
pub struct FakeParser {
    pub response: Mutex<Result<ParsedProduct, u16>>,
    pub requests: Mutex<Vec<ParseRequest>>,
}

impl FakeParser {
    pub fn returning(parsed: ParsedProduct) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(parsed)),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Fail every call with this HTTP status and the service's error body.
    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(status)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductParser for FakeParser {
    async fn parse_product(&self, request: &ParseRequest) -> Result<ParsedProduct, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        match &*self.response.lock().unwrap() {
            Ok(parsed) => Ok(parsed.clone()),
            Err(400) => Err(HttpError::BadRequest(
                r#"{"error": "Unsupported marketplace. Only Ozon and Wildberries are supported."}"#
                    .to_string(),
            )),
            Err(status) => Err(HttpError::ServerError {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

pub fn parsed(price: u64) -> ParsedProduct {
    ParsedProduct {
        name: Some("TWS wireless earbuds".to_string()),
        current_price: price,
        marketplace: Some("ozon".to_string()),
        image_url: Some("https://cdn.ozon.ru/earbuds.jpg".to_string()),
        article_number: Some("123456789".to_string()),
        product_url: Some("https://www.ozon.ru/product/earbuds-123456789/".to_string()),
    }
}

pub fn client(store: Arc<FakeStore>, parser: Arc<FakeParser>) -> PriceTrackerClient {
    PriceTrackerClient::builder()
        .store(store)
        .parser(parser)
        .build()
        .expect("client builds with injected backends")
}

pub fn client_with_store(store: Arc<FakeStore>) -> PriceTrackerClient {
    client(store, FakeParser::failing(500))
}
