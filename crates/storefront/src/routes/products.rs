//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use stride_core::catalog::{CatalogEntry, Product};

use crate::filters;
use crate::imgix;
use crate::routes::{ErrorTemplate, NotFoundTemplate};
use crate::state::AppState;

/// Format an amount as a display price.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Product display data for grid cards.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub category_name: String,
    pub color: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.display_name().to_string(),
            price: format_price(product.metadata.price),
            image_url: product
                .primary_image()
                .map(|img| imgix::card(img.display_url()))
                .unwrap_or_default(),
            category_name: product.category_name().unwrap_or_default().to_string(),
            color: product.metadata.color.clone().unwrap_or_default(),
            in_stock: product.available(),
        }
    }
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub color: String,
    pub category_name: String,
    pub main_image_url: String,
    pub thumb_urls: Vec<String>,
    pub sizes: Vec<String>,
    pub in_stock: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.display_name().to_string(),
            description: product.metadata.description.clone().unwrap_or_default(),
            price: format_price(product.metadata.price),
            color: product.metadata.color.clone().unwrap_or_default(),
            category_name: product.category_name().unwrap_or_default().to_string(),
            main_image_url: product
                .primary_image()
                .map(|img| imgix::detail(img.display_url()))
                .unwrap_or_default(),
            thumb_urls: product
                .metadata
                .images
                .iter()
                .map(|img| imgix::thumb(img.display_url()))
                .collect(),
            sizes: product.metadata.sizes.clone(),
            in_stock: product.available(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Display product listing page, newest first.
///
/// An upstream failure renders the empty state; the page contract does
/// not distinguish "no products" from "catalog unreachable".
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.cosmic().get_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch products: {e}");
            Vec::new()
        },
        |products| products.iter().map(ProductCardView::from).collect(),
    );

    ProductsIndexTemplate { products }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.cosmic().get_product_by_slug(&slug).await {
        Ok(Some(product)) => ProductShowTemplate {
            product: ProductDetailView::from(&product),
        }
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                message: "Product not found.".to_string(),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch product {slug}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorTemplate {
                    message: "An error occurred loading this product.".to_string(),
                },
            )
                .into_response()
        }
    }
}
