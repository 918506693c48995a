//! Search page route handler.
//!
//! The page is fully server-rendered from query parameters, so it works
//! without scripting; with HTMX present the form re-submits on input
//! with a 300 ms delay and replaces any in-flight request, matching the
//! debounce/supersede contract of `stride_core::search::QuerySequencer`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use stride_core::catalog::CatalogEntry;
use stride_core::search::{SearchFilter, SortKey};

use crate::filters;
use crate::state::AppState;

pub use super::products::ProductCardView;

/// Deserialize empty strings as None for optional price fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Search query parameters, shared with the JSON endpoint.
///
/// Absent or unrecognized values fall back to their defaults rather
/// than rejecting the request.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
    #[serde(default, rename = "minPrice", deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, rename = "maxPrice", deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, rename = "inStock")]
    pub in_stock: String,
    #[serde(default)]
    pub featured: String,
    pub size: Option<String>,
    #[serde(default, rename = "sortBy")]
    pub sort_by: String,
}

impl SearchParams {
    /// Build the structured filter these parameters describe.
    #[must_use]
    pub fn filter(&self) -> SearchFilter {
        SearchFilter {
            category: self
                .category
                .as_deref()
                .filter(|c| !c.is_empty() && *c != "all")
                .map(String::from),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock == "true",
            featured: self.featured == "true",
            size: self
                .size
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(String::from),
            sort_by: SortKey::parse(&self.sort_by),
        }
    }
}

/// A category option in the filter sidebar.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub slug: String,
    pub name: String,
    pub selected: bool,
}

/// A size option in the filter sidebar.
#[derive(Clone)]
pub struct SizeOptionView {
    pub value: String,
    pub selected: bool,
}

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchPageTemplate {
    pub query: String,
    pub products: Vec<ProductCardView>,
    pub total: usize,
    pub categories: Vec<CategoryOptionView>,
    pub sizes: Vec<SizeOptionView>,
    pub min_price: String,
    pub max_price: String,
    pub in_stock: bool,
    pub featured: bool,
    pub sort_by: String,
}

/// Display the search page.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let filter = params.filter();

    let (products, categories) = tokio::join!(
        state.cosmic().get_products(),
        state.cosmic().get_categories(),
    );

    let items = products.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch products for search: {e}");
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch categories for search: {e}");
        Vec::new()
    });

    // Distinct size values across the catalog, for the size dropdown.
    let mut size_values: Vec<String> = items
        .iter()
        .flat_map(|p| p.metadata.sizes.iter().cloned())
        .collect();
    size_values.sort();
    size_values.dedup();

    let results = stride_core::search::search(&items, &params.q, &filter);

    SearchPageTemplate {
        query: params.q.clone(),
        total: results.len(),
        products: results.iter().map(ProductCardView::from).collect(),
        categories: categories
            .iter()
            .map(|c| CategoryOptionView {
                slug: c.slug.clone(),
                name: c.display_name().to_string(),
                selected: filter.category.as_deref() == Some(c.slug.as_str()),
            })
            .collect(),
        sizes: size_values
            .into_iter()
            .map(|value| SizeOptionView {
                selected: filter.size.as_deref() == Some(value.as_str()),
                value,
            })
            .collect(),
        min_price: filter.min_price.map(|p| p.to_string()).unwrap_or_default(),
        max_price: filter.max_price.map(|p| p.to_string()).unwrap_or_default(),
        in_stock: filter.in_stock,
        featured: filter.featured,
        sort_by: filter.sort_by.as_str().to_string(),
    }
}
