//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check (in lib.rs)
//!
//! # Catalog
//! GET  /products               - Product listing (newest first)
//! GET  /products/{slug}        - Product detail
//! GET  /categories             - Category grid
//! GET  /categories/{slug}      - Category detail with its products
//! GET  /collections            - Collection listing
//! GET  /collections/{slug}     - Collection detail with its products
//!
//! # Search
//! GET  /search                 - Server-rendered search page
//! GET  /api/search             - JSON search endpoint
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Content
//! GET  /{slug}                 - CMS content page
//! ```

pub mod api;
pub mod cart;
pub mod categories;
pub mod collections;
pub mod home;
pub mod pages;
pub mod products;
pub mod search;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Not-found page template, shared by every slug route.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

/// Generic error page template for upstream failures.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{slug}", get(collections::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/search", get(api::search))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/collections", collection_routes())
        // Search page
        .route("/search", get(search::search_page))
        // Cart routes
        .nest("/cart", cart_routes())
        // JSON API
        .nest("/api", api_routes())
        // CMS content pages claim remaining root-level slugs
        .route("/{slug}", get(pages::show))
}
