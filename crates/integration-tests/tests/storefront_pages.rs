//! Integration tests for the server-rendered pages.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;

use stride_integration_tests::TestContext;

async fn get(ctx: &TestContext, path: &str) -> (StatusCode, String) {
    let resp = ctx
        .client
        .get(ctx.url(path))
        .send()
        .await
        .expect("request failed");
    let status = resp.status();
    let body = resp.text().await.expect("body was not text");
    (status, body)
}

#[tokio::test]
async fn health_check_responds_ok() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn home_renders_hero_featured_products_and_collections() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/").await;

    assert_eq!(status, StatusCode::OK);
    // Hero section (promotional sections are not rendered as heroes)
    assert!(body.contains("Run Into Spring"));
    assert!(!body.contains("Gifts for Runners"));
    // Featured collection and featured product
    assert!(body.contains("Jumpman"));
    assert!(body.contains("Jordan 1"));
    assert!(!body.contains("Jordan 4"));
}

#[tokio::test]
async fn product_listing_is_newest_first() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/products").await;

    assert_eq!(status, StatusCode::OK);
    for name in ["Jordan 1", "Jordan 4", "Court Classic"] {
        assert!(body.contains(name), "missing {name}");
    }
    let classic = body.find("Court Classic").unwrap();
    let jordan_1 = body.find("Jordan 1").unwrap();
    assert!(classic < jordan_1, "newest product should render first");
}

#[tokio::test]
async fn product_detail_renders_price_sizes_and_cart_form() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/products/jordan-1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Jordan 1"));
    assert!(body.contains("$150.00"));
    assert!(body.contains("Shoes"));
    assert!(body.contains("/cart/add"));
    // Derived display image URL carries resize parameters
    assert!(body.contains("w=800&amp;h=800") || body.contains("w=800&h=800"));
}

#[tokio::test]
async fn out_of_stock_product_has_no_cart_form() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/products/court-classic").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Out of Stock"));
    assert!(!body.contains("/cart/add"));
}

#[tokio::test]
async fn unknown_product_renders_not_found_page() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/products/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found."));
}

#[tokio::test]
async fn category_page_lists_only_its_products() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/categories/shoes").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Jordan 1"));
    assert!(body.contains("Jordan 4"));
    assert!(!body.contains("Court Classic"));
}

#[tokio::test]
async fn unknown_category_renders_not_found_without_erroring() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/categories/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Category not found."));
}

#[tokio::test]
async fn collection_page_lists_member_products() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/collections/jumpman").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Flight heritage"));
    assert!(body.contains("Jordan 1"));
    assert!(!body.contains("Jordan 4"));
}

#[tokio::test]
async fn content_page_renders_cms_html() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/about-us").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("About Stride"));
    assert!(body.contains("<p>Stride builds performance gear for everyday athletes.</p>"));
}

#[tokio::test]
async fn unknown_root_slug_renders_not_found_page() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/no-such-page").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found."));
}

#[tokio::test]
async fn search_page_renders_filtered_results() {
    let ctx = TestContext::new().await;
    let (status, body) = get(&ctx, "/search?q=jordan&featured=true&sortBy=price-high").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Search Results for"));
    assert!(body.contains("1 products found"));
    assert!(body.contains("Jordan 1"));
    assert!(!body.contains("Jordan 4"));
}

#[tokio::test]
async fn listing_pages_degrade_to_empty_state_when_cms_is_down() {
    let ctx = TestContext::with_failing_cms().await;

    let (status, body) = get(&ctx, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found."));

    // Empty-after-error is indistinguishable from empty-with-no-error.
    let (status, body) = get(&ctx, "/search?q=jordan").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("0 products found"));

    let (status, _) = get(&ctx, "/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/products"))
        .send()
        .await
        .expect("request failed");

    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(
        resp.headers()
            .get("x-frame-options")
            .and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert!(resp.headers().contains_key("content-security-policy"));
}
