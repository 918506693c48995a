//! Integration tests for the CMS client against the mock object store.
//!
//! Exercises the read operations directly, including 404 normalization
//! and the select-dropdown query semantics.

#![allow(clippy::unwrap_used)]

use stride_core::catalog::CatalogEntry;
use stride_integration_tests::{fixtures, spawn_failing_cms, spawn_mock_cms, test_config};
use stride_storefront::cosmic::{CmsError, CosmicClient};

async fn client() -> CosmicClient {
    let cms_url = spawn_mock_cms(fixtures::catalog()).await;
    CosmicClient::new(&test_config(&cms_url).cosmic)
}

#[tokio::test]
async fn products_come_back_newest_first() {
    let client = client().await;
    let products = client.get_products().await.unwrap();

    let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["court-classic", "jordan-4", "jordan-1"]);
}

#[tokio::test]
async fn featured_products_filter_on_the_flag() {
    let client = client().await;
    let products = client.get_featured_products().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products.first().unwrap().slug, "jordan-1");
}

#[tokio::test]
async fn product_references_arrive_embedded() {
    let client = client().await;
    let product = client.get_product_by_slug("jordan-1").await.unwrap().unwrap();
    assert_eq!(product.display_name(), "Jordan 1");

    let category = product.metadata.category.as_ref().unwrap();
    assert_eq!(category.slug(), Some("shoes"));
    let collection = product.metadata.collection.as_ref().unwrap();
    assert_eq!(collection.id(), "col-jumpman");
}

#[tokio::test]
async fn main_categories_match_the_select_key() {
    let client = client().await;
    let categories = client.get_main_categories().await.unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories.first().unwrap().slug, "shoes");
    assert!(categories.first().unwrap().is_main());
}

#[tokio::test]
async fn unknown_slugs_normalize_to_none() {
    let client = client().await;

    assert!(client.get_product_by_slug("nope").await.unwrap().is_none());
    assert!(client.get_category_by_slug("nope").await.unwrap().is_none());
    assert!(client.get_collection_by_slug("nope").await.unwrap().is_none());
    assert!(
        client
            .get_content_page_by_slug("nope")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn empty_type_queries_normalize_to_empty_lists() {
    // A catalog with no collections at all: the mock answers 404, the
    // client answers an empty list.
    let objects = vec![fixtures::shoes_category()];
    let cms_url = spawn_mock_cms(objects).await;
    let client = CosmicClient::new(&test_config(&cms_url).cosmic);

    assert!(client.get_collections().await.unwrap().is_empty());
    assert!(client.get_homepage_sections().await.unwrap().is_empty());
}

#[tokio::test]
async fn homepage_sections_come_back_in_editor_order() {
    let client = client().await;
    let sections = client.get_homepage_sections().await.unwrap();

    let orders: Vec<i64> = sections.iter().map(|s| s.metadata.section_order).collect();
    assert_eq!(orders, vec![1, 2]);
    assert!(sections.first().unwrap().is_hero());
}

#[tokio::test]
async fn featured_collections_filter_on_the_homepage_flag() {
    let client = client().await;
    let collections = client.get_featured_collections().await.unwrap();

    assert_eq!(collections.len(), 1);
    assert_eq!(collections.first().unwrap().slug, "jumpman");
}

#[tokio::test]
async fn content_pages_are_listed_and_fetched() {
    let client = client().await;

    let pages = client.get_content_pages().await.unwrap();
    assert_eq!(pages.len(), 1);

    let page = client
        .get_content_page_by_slug("about-us")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.metadata.title, "About Stride");
}

#[tokio::test]
async fn upstream_failures_surface_as_api_errors() {
    let cms_url = spawn_failing_cms().await;
    let client = CosmicClient::new(&test_config(&cms_url).cosmic);

    let err = client.get_products().await.unwrap_err();
    assert!(matches!(err, CmsError::Api { status: 500, .. }));
}

#[tokio::test]
async fn cache_invalidation_allows_refetching() {
    let client = client().await;

    let first = client.get_products().await.unwrap();
    client.invalidate_all().await;
    let second = client.get_products().await.unwrap();
    assert_eq!(first, second);
}
