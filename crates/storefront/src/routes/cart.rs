//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. The cart itself lives in the session under a single fixed
//! storage key as a JSON array of lines; it is rehydrated at the start
//! of every cart request and written back after every mutation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stride_core::cart::{CART_STORAGE_KEY, Cart, CartLine};
use stride_core::catalog::CatalogEntry;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::imgix;
use crate::routes::products::format_price;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            size: line.size.clone().unwrap_or_default(),
            quantity: line.quantity,
            price: format_price(line.unit_price),
            line_price: format_price(line.line_total()),
            image_url: line.image_url.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: format_price(cart.total_price()),
            item_count: cart.total_items(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Rehydrate the cart from the session.
///
/// A corrupt payload is logged and treated as an empty cart - never a
/// failed request.
async fn load_cart(session: &Session) -> Cart {
    match session.get::<String>(CART_STORAGE_KEY).await {
        Ok(Some(payload)) => Cart::from_json(&payload).unwrap_or_else(|e| {
            tracing::warn!("Corrupt cart payload, starting empty: {e}");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Failed to read cart from session: {e}");
            Cart::new()
        }
    }
}

/// Persist the cart to the session.
async fn save_cart(session: &Session, cart: &Cart) {
    match cart.to_json() {
        Ok(payload) => {
            if let Err(e) = session.insert(CART_STORAGE_KEY, payload).await {
                tracing::error!("Failed to persist cart to session: {e}");
            }
        }
        Err(e) => tracing::error!("Failed to serialize cart: {e}"),
    }
}

/// Empty-string form values mean "no size".
fn normalize_size(size: Option<String>) -> Option<String> {
    size.filter(|s| !s.is_empty())
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub slug: String,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub size: Option<String>,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub size: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add item to cart (HTMX).
///
/// The product is looked up by slug and the line is built from catalog
/// data - client-supplied prices are never trusted. Returns the count
/// badge plus an HTMX trigger so other cart UI refreshes itself.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product = match state.cosmic().get_product_by_slug(&form.slug).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html("<span class=\"cart-error\">Product not found</span>"),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let mut cart = load_cart(&session).await;
    cart.add(CartLine {
        product_id: product.id.clone(),
        name: product.display_name().to_string(),
        unit_price: product.metadata.price,
        size: normalize_size(form.size),
        image_url: product
            .primary_image()
            .map(|img| imgix::thumb(img.display_url()))
            .unwrap_or_default(),
        quantity: form.quantity.unwrap_or(1),
    });
    save_cart(&session, &cart).await;

    add_breadcrumb("cart", "Added item to cart", Some(&[("product", &form.slug)]));

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX). A quantity of zero removes the
/// line; updating an absent line is a silent no-op.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(
        &form.product_id,
        form.quantity,
        normalize_size(form.size).as_deref(),
    );
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX). Removing an absent line is a silent
/// no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove(&form.product_id, normalize_size(form.size).as_deref());
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Response {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartCountTemplate {
        count: cart.total_items(),
    }
}
