//! Integration tests for the session cart.
//!
//! One `TestContext` per test; the reqwest cookie store plays the role
//! of the browser, so the session cart persists across requests.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;

use stride_integration_tests::TestContext;

async fn add(ctx: &TestContext, slug: &str, size: &str, quantity: u32) -> (StatusCode, String) {
    let quantity = quantity.to_string();
    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[
            ("slug", slug),
            ("size", size),
            ("quantity", quantity.as_str()),
        ])
        .send()
        .await
        .expect("add request failed");
    let status = resp.status();
    let body = resp.text().await.expect("body was not text");
    (status, body)
}

async fn count(ctx: &TestContext) -> String {
    ctx.client
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .expect("count request failed")
        .text()
        .await
        .expect("body was not text")
        .trim()
        .to_string()
}

async fn cart_page(ctx: &TestContext) -> String {
    ctx.client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("cart request failed")
        .text()
        .await
        .expect("body was not text")
}

#[tokio::test]
async fn cart_starts_empty() {
    let ctx = TestContext::new().await;
    assert_eq!(count(&ctx).await, "0");
    assert!(cart_page(&ctx).await.contains("Your bag is empty."));
}

#[tokio::test]
async fn adding_the_same_selection_twice_merges_into_one_line() {
    let ctx = TestContext::new().await;

    let (status, body) = add(&ctx, "jordan-1", "10", 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "1");

    let (status, body) = add(&ctx, "jordan-1", "10", 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "3");

    let page = cart_page(&ctx).await;
    // One line, quantity 3, priced from catalog data: 3 x $150.
    assert_eq!(page.matches("Size 10").count(), 1);
    assert!(page.contains("value=\"3\""));
    assert!(page.contains("Subtotal (3 items): $450.00"));
}

#[tokio::test]
async fn different_sizes_are_separate_lines() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "9", 1).await;
    add(&ctx, "jordan-1", "10", 1).await;

    assert_eq!(count(&ctx).await, "2");
    let page = cart_page(&ctx).await;
    assert!(page.contains("Size 9"));
    assert!(page.contains("Size 10"));
    assert!(page.contains("Subtotal (2 items): $300.00"));
}

#[tokio::test]
async fn update_to_zero_removes_the_line() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "10", 2).await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .form(&[("product_id", "prod-jordan-1"), ("size", "10"), ("quantity", "0")])
        .send()
        .await
        .expect("update request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body was not text");
    assert!(body.contains("Your bag is empty."));

    assert_eq!(count(&ctx).await, "0");
}

#[tokio::test]
async fn update_replaces_quantity_in_place() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "10", 1).await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .form(&[("product_id", "prod-jordan-1"), ("size", "10"), ("quantity", "5")])
        .send()
        .await
        .expect("update request failed");
    let body = resp.text().await.expect("body was not text");
    assert!(body.contains("Subtotal (5 items): $750.00"));
}

#[tokio::test]
async fn remove_deletes_only_the_matching_line() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "10", 1).await;
    add(&ctx, "jordan-4", "11", 1).await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .form(&[("product_id", "prod-jordan-1"), ("size", "10")])
        .send()
        .await
        .expect("remove request failed");
    let body = resp.text().await.expect("body was not text");
    assert!(!body.contains("Jordan 1"));
    assert!(body.contains("Jordan 4"));

    // Removing a line that is no longer there is a silent no-op.
    let resp = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .form(&[("product_id", "prod-jordan-1"), ("size", "10")])
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(count(&ctx).await, "1");
}

#[tokio::test]
async fn clear_empties_the_cart() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "10", 1).await;
    add(&ctx, "jordan-4", "11", 2).await;
    assert_eq!(count(&ctx).await, "3");

    let resp = ctx
        .client
        .post(ctx.url("/cart/clear"))
        .send()
        .await
        .expect("clear request failed");
    assert!(resp
        .text()
        .await
        .expect("body was not text")
        .contains("Your bag is empty."));
    assert_eq!(count(&ctx).await, "0");
}

#[tokio::test]
async fn adding_an_unknown_product_is_rejected() {
    let ctx = TestContext::new().await;
    let (status, _) = add(&ctx, "does-not-exist", "", 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count(&ctx).await, "0");
}

#[tokio::test]
async fn cart_mutations_fire_the_htmx_trigger() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[("slug", "jordan-1"), ("size", "10"), ("quantity", "1")])
        .send()
        .await
        .expect("add request failed");

    assert_eq!(
        resp.headers()
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
}

#[tokio::test]
async fn sessions_do_not_share_carts() {
    let ctx = TestContext::new().await;
    add(&ctx, "jordan-1", "10", 1).await;

    // A second client has no session cookie and sees an empty cart.
    let other = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client");
    let body = other
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .expect("count request failed")
        .text()
        .await
        .expect("body was not text");
    assert_eq!(body.trim(), "0");
}
