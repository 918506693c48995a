//! Product query pipeline and live-search sequencing.
//!
//! The pipeline is a deliberate linear scan: the catalog is small and
//! static, so every search runs text matching, an AND-conjunction of
//! structured filters, and a stable sort over the full in-memory product
//! set. No index, no pagination.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Link, Product};

/// Debounce window applied to live search input before dispatching.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// =============================================================================
// Filters
// =============================================================================

/// Sort order for search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending `created_at` (the default).
    #[default]
    Newest,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Ascending name, case-insensitive.
    Name,
}

impl SortKey {
    /// Parse a `sortBy` query value, defaulting to [`Self::Newest`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "name" => Self::Name,
            _ => Self::Newest,
        }
    }

    /// The query-parameter spelling of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }
}

/// Structured search filter, constructed per query and never persisted.
///
/// Serializes with the same camelCase field names the search endpoint
/// accepts, so responses can echo the active filter verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    /// Category slug to match (embedded category links only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    /// When set, only products explicitly flagged in stock pass.
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub sort_by: SortKey,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run the query pipeline over the full product set.
///
/// Pure: the input is never mutated, identical inputs produce identical
/// output, and the result is always a subset of `items`. Callers that
/// hit an upstream fetch failure pass an empty slice and get an empty
/// result — indistinguishable from a query with no matches, by design
/// of the page contract.
#[must_use]
pub fn search(items: &[Product], query: &str, filter: &SearchFilter) -> Vec<Product> {
    let term = query.trim().to_lowercase();

    let mut results: Vec<Product> = items
        .iter()
        .filter(|product| term.is_empty() || matches_term(product, &term))
        .filter(|product| matches_filter(product, filter))
        .cloned()
        .collect();

    sort_products(&mut results, filter.sort_by);
    results
}

/// Case-insensitive substring match against name, description, color,
/// and the embedded category name. Any single hit passes.
fn matches_term(product: &Product, term: &str) -> bool {
    let meta = &product.metadata;

    contains(product.display_name(), term)
        || meta.description.as_deref().is_some_and(|d| contains(d, term))
        || meta.color.as_deref().is_some_and(|c| contains(c, term))
        || product.category_name().is_some_and(|n| contains(n, term))
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// AND-conjunction of the structured filters; unset fields always pass.
fn matches_filter(product: &Product, filter: &SearchFilter) -> bool {
    let meta = &product.metadata;

    if let Some(slug) = filter.category.as_deref()
        && meta.category.as_ref().and_then(Link::slug) != Some(slug)
    {
        return false;
    }
    if let Some(min) = filter.min_price
        && meta.price < min
    {
        return false;
    }
    if let Some(max) = filter.max_price
        && meta.price > max
    {
        return false;
    }
    if filter.in_stock && meta.in_stock != Some(true) {
        return false;
    }
    if filter.featured && !meta.featured {
        return false;
    }
    if let Some(size) = filter.size.as_deref()
        && !meta.sizes.iter().any(|s| s == size)
    {
        return false;
    }

    true
}

/// Stable sort by the requested key. `Vec::sort_by` is stable, so ties
/// keep their incoming order.
fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceLow => products.sort_by(|a, b| a.metadata.price.cmp(&b.metadata.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.metadata.price.cmp(&a.metadata.price)),
        SortKey::Name => products.sort_by(|a, b| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
        }),
    }
}

// =============================================================================
// Live-search sequencing
// =============================================================================

/// Single-slot latest-request token for debounced live search.
///
/// Rapid input changes coalesce into one pending query: each `submit`
/// supersedes the previous one and advances the current token, and a
/// response is only applied when its token is still current. This makes
/// the last-write-wins behavior explicit instead of relying on
/// incidental response timing.
#[derive(Debug)]
pub struct QuerySequencer {
    debounce: Duration,
    next_token: u64,
    current: u64,
    pending: Option<PendingQuery>,
}

#[derive(Debug)]
struct PendingQuery {
    token: u64,
    query: String,
    submitted: Instant,
}

impl Default for QuerySequencer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl QuerySequencer {
    /// Create a sequencer with the given debounce window.
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            next_token: 1,
            current: 0,
            pending: None,
        }
    }

    /// Record a new input event, superseding any pending query.
    ///
    /// Returns the token the eventual response must present to
    /// [`Self::is_current`].
    pub fn submit(&mut self, query: impl Into<String>, now: Instant) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.current = token;
        self.pending = Some(PendingQuery {
            token,
            query: query.into(),
            submitted: now,
        });
        token
    }

    /// The pending query, once its debounce window has elapsed.
    #[must_use]
    pub fn due(&self, now: Instant) -> Option<(u64, &str)> {
        self.pending
            .as_ref()
            .filter(|p| now.duration_since(p.submitted) >= self.debounce)
            .map(|p| (p.token, p.query.as_str()))
    }

    /// Take the pending query for dispatch, once due.
    pub fn take_due(&mut self, now: Instant) -> Option<(u64, String)> {
        if self.due(now).is_none() {
            return None;
        }
        self.pending.take().map(|p| (p.token, p.query))
    }

    /// Whether a response carrying `token` may still be applied.
    ///
    /// A stale in-flight response (superseded by a newer `submit`) must
    /// be dropped by the caller.
    #[must_use]
    pub const fn is_current(&self, token: u64) -> bool {
        self.current == token
    }
}
