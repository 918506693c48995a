//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use stride_core::catalog::{CatalogEntry, Collection};

use crate::filters;
use crate::imgix;
use crate::routes::{ErrorTemplate, NotFoundTemplate};
use crate::state::AppState;

pub use super::products::ProductCardView;

/// Collection display data for templates.
#[derive(Clone)]
pub struct CollectionCardView {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub hero_image_url: String,
}

impl From<&Collection> for CollectionCardView {
    fn from(collection: &Collection) -> Self {
        Self {
            slug: collection.slug.clone(),
            name: collection.display_name().to_string(),
            tagline: collection.metadata.tagline.clone().unwrap_or_default(),
            description: collection.metadata.description.clone().unwrap_or_default(),
            hero_image_url: collection
                .metadata
                .hero_image
                .as_ref()
                .map(|img| imgix::hero(img.display_url()))
                .unwrap_or_default(),
        }
    }
}

/// Collection listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub collections: Vec<CollectionCardView>,
}

/// Collection detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub collection: CollectionCardView,
    pub products: Vec<ProductCardView>,
}

/// Display collection listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let collections = state.cosmic().get_collections().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch collections: {e}");
            Vec::new()
        },
        |collections| collections.iter().map(CollectionCardView::from).collect(),
    );

    CollectionsIndexTemplate { collections }
}

/// Display collection detail page with the products that reference it.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let collection = match state.cosmic().get_collection_by_slug(&slug).await {
        Ok(Some(collection)) => collection,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                NotFoundTemplate {
                    message: "Collection not found.".to_string(),
                },
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch collection {slug}: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorTemplate {
                    message: "An error occurred loading this collection.".to_string(),
                },
            )
                .into_response();
        }
    };

    let products = state.cosmic().get_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch products for collection {slug}: {e}");
            Vec::new()
        },
        |products| {
            products
                .iter()
                .filter(|p| {
                    p.metadata
                        .collection
                        .as_ref()
                        .is_some_and(|link| link.id() == collection.id)
                })
                .map(ProductCardView::from)
                .collect()
        },
    );

    CollectionShowTemplate {
        collection: CollectionCardView::from(&collection),
        products,
    }
    .into_response()
}
