//! Integration tests for the JSON search endpoint.
//!
//! Drives `GET /api/search` over HTTP against the fixture catalog:
//! three products (a featured Jordan 1 at $150, a Jordan 4 at $200, an
//! out-of-stock Court Classic at $95 in Apparel).

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use stride_integration_tests::TestContext;

async fn search(ctx: &TestContext, query_string: &str) -> Value {
    let resp = ctx
        .client
        .get(ctx.url(&format!("/api/search{query_string}")))
        .send()
        .await
        .expect("search request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("search response was not JSON")
}

fn result_slugs(body: &Value) -> Vec<&str> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn default_search_returns_full_catalog_newest_first() {
    let ctx = TestContext::new().await;
    let body = search(&ctx, "").await;

    assert_eq!(body["total"], 3);
    assert_eq!(
        result_slugs(&body),
        vec!["court-classic", "jordan-4", "jordan-1"]
    );
    assert_eq!(body["query"], "");
    assert_eq!(body["filters"]["sortBy"], "newest");
}

#[tokio::test]
async fn featured_price_high_returns_only_the_featured_jordan() {
    let ctx = TestContext::new().await;
    let body = search(&ctx, "?q=jordan&featured=true&sortBy=price-high").await;

    assert_eq!(body["total"], 1);
    assert_eq!(result_slugs(&body), vec!["jordan-1"]);
    assert_eq!(body["products"][0]["metadata"]["name"], "Jordan 1");

    // The query and resolved filter are echoed back.
    assert_eq!(body["query"], "jordan");
    assert_eq!(body["filters"]["featured"], true);
    assert_eq!(body["filters"]["sortBy"], "price-high");
}

#[tokio::test]
async fn text_match_spans_name_color_and_category() {
    let ctx = TestContext::new().await;

    let by_name = search(&ctx, "?q=JORDAN").await;
    assert_eq!(by_name["total"], 2);

    let by_color = search(&ctx, "?q=red").await;
    assert_eq!(result_slugs(&by_color), vec!["jordan-1"]);

    let by_category = search(&ctx, "?q=apparel").await;
    assert_eq!(result_slugs(&by_category), vec!["court-classic"]);

    let no_match = search(&ctx, "?q=trampoline").await;
    assert_eq!(no_match["total"], 0);
}

#[tokio::test]
async fn price_window_filters_are_inclusive() {
    let ctx = TestContext::new().await;
    let body = search(&ctx, "?minPrice=100&maxPrice=180").await;
    assert_eq!(result_slugs(&body), vec!["jordan-1"]);

    let exact = search(&ctx, "?minPrice=150&maxPrice=150").await;
    assert_eq!(result_slugs(&exact), vec!["jordan-1"]);
}

#[tokio::test]
async fn in_stock_filter_requires_explicit_flag() {
    let ctx = TestContext::new().await;
    let body = search(&ctx, "?inStock=true").await;
    assert_eq!(body["total"], 2);
    assert!(!result_slugs(&body).contains(&"court-classic"));
}

#[tokio::test]
async fn size_and_category_filters_apply() {
    let ctx = TestContext::new().await;

    let by_size = search(&ctx, "?size=11").await;
    assert_eq!(result_slugs(&by_size), vec!["jordan-4"]);

    let by_category = search(&ctx, "?category=shoes").await;
    assert_eq!(by_category["total"], 2);

    let all = search(&ctx, "?category=all").await;
    assert_eq!(all["total"], 3);
}

#[tokio::test]
async fn price_sort_orders_are_reverses() {
    let ctx = TestContext::new().await;

    let low = search(&ctx, "?sortBy=price-low").await;
    assert_eq!(
        result_slugs(&low),
        vec!["court-classic", "jordan-1", "jordan-4"]
    );

    let high = search(&ctx, "?sortBy=price-high").await;
    assert_eq!(
        result_slugs(&high),
        vec!["jordan-4", "jordan-1", "court-classic"]
    );
}

#[tokio::test]
async fn unrecognized_parameters_fall_back_to_defaults() {
    let ctx = TestContext::new().await;
    let body = search(&ctx, "?sortBy=banana&inStock=maybe&minPrice=").await;

    assert_eq!(body["total"], 3);
    assert_eq!(body["filters"]["sortBy"], "newest");
    assert_eq!(body["filters"]["inStock"], false);
}

#[tokio::test]
async fn upstream_failure_returns_500_with_error_body() {
    let ctx = TestContext::with_failing_cms().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/search?q=jordan"))
        .send()
        .await
        .expect("search request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.expect("error response was not JSON");
    assert_eq!(body["error"], "Failed to search products");
}
