//! Integration tests against a running persistence and parsing service.
//!
//! All tests are `#[ignore]` because they need the backend. Endpoints come from
//! `PRICETRACKER_API_URL` / `PRICETRACKER_PARSE_URL` (a `.env` file is read if
//! present) and default to localhost.
//!
//! Run with:
//! ```bash
//! cargo test --test http_live -- --ignored
//! ```

use std::time::Duration;

use tokio::time::timeout;

use pricetracker_sdk::client::{PriceTrackerClient, PriceTrackerClientBuilder};
use pricetracker_sdk::domain::product::LoadSource;
use pricetracker_sdk::error::SdkError;

const TEST_TIMEOUT: Duration = Duration::from_secs(30);
const TEST_PRODUCT_URL: &str = "https://www.wildberries.ru/catalog/123456789/detail.aspx";

fn live_client() -> PriceTrackerClient {
    let _ = dotenvy::dotenv();
    PriceTrackerClientBuilder::from_env()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn load_reaches_the_backend() {
    let client = live_client();
    let report = timeout(TEST_TIMEOUT, client.products().load_report())
        .await
        .expect("timed out loading products");

    assert_eq!(report.source, LoadSource::Remote, "rejected: {:?}", report.rejected);
    assert!(client.is_synced());
    let metrics = client.metrics().await;
    assert_eq!(metrics.total_products, report.products.len());
}

#[tokio::test]
#[ignore]
async fn parse_then_track_then_delete() {
    let client = live_client();
    client.products().load().await;

    let draft = match timeout(TEST_TIMEOUT, client.ingest().parse(TEST_PRODUCT_URL))
        .await
        .expect("timed out parsing")
    {
        Ok(draft) => draft,
        Err(SdkError::Unresolved { reason, .. }) => {
            eprintln!("parser could not resolve the test URL: {reason}");
            return;
        }
        Err(err) => panic!("unexpected parse error: {err}"),
    };

    let target = draft.suggested_target_price();
    let article = draft.article_number.clone();
    let products = client
        .products()
        .create(draft, target)
        .await
        .expect("create should succeed");
    let created = products
        .iter()
        .find(|p| p.article_number == article)
        .expect("created product should be listed")
        .clone();
    assert_eq!(created.target_price, target);

    let outcome = client.mutations().delete(&created.id).await;
    assert!(outcome.is_applied(), "delete failed: {outcome:?}");
}
