//! HTTP tests against a running storefront.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p emporium-storefront)
//!
//! Set `STOREFRONT_BASE_URL` to target a non-default address.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use emporium_integration_tests::storefront_base_url;

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = Client::new();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_customer_groups_unknown_uuids_yield_empty_list() {
    let base_url = storefront_base_url();
    let uuids = format!("{},{}", Uuid::new_v4(), Uuid::new_v4());

    let resp = Client::new()
        .get(format!("{base_url}/customer-groups?uuids={uuids}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_benchmark_for_unknown_shop_is_not_found() {
    let base_url = storefront_base_url();

    let resp = Client::new()
        .get(format!("{base_url}/shops/2147483647/benchmark"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_evaluate_for_unknown_shop_is_not_found() {
    let base_url = storefront_base_url();

    let resp = Client::new()
        .post(format!("{base_url}/shops/2147483647/rules/evaluate"))
        .json(&json!({"rule": {"type": "is_new_customer"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
