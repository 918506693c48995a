//! JSON API route handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use stride_core::catalog::Product;
use stride_core::search::SearchFilter;

use crate::state::AppState;

pub use super::search::SearchParams;

/// Search endpoint response body.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub total: usize,
    pub query: String,
    pub filters: SearchFilter,
}

/// JSON search endpoint.
///
/// Runs the query pipeline over the full product set and echoes the
/// query and the resolved filter back alongside the results. Upstream
/// failure is a 500 with an `{error}` body - never a panic, never a
/// partial result.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let filter = params.filter();

    match state.cosmic().get_products().await {
        Ok(items) => {
            let products = stride_core::search::search(&items, &params.q, &filter);
            let total = products.len();
            Json(SearchResponse {
                products,
                total,
                query: params.q,
                filters: filter,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!("Search API failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to search products" })),
            )
                .into_response()
        }
    }
}
