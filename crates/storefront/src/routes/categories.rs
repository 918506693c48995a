//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use stride_core::catalog::{CatalogEntry, Category};

use crate::filters;
use crate::imgix;
use crate::routes::{ErrorTemplate, NotFoundTemplate};
use crate::state::AppState;

pub use super::products::ProductCardView;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryCardView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Category> for CategoryCardView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.display_name().to_string(),
            description: category.metadata.description.clone().unwrap_or_default(),
            image_url: category
                .metadata
                .image
                .as_ref()
                .map(|img| imgix::thumb(img.display_url()))
                .unwrap_or_default(),
        }
    }
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryCardView>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub category: CategoryCardView,
    pub products: Vec<ProductCardView>,
}

/// Display category listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let categories = state.cosmic().get_categories().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch categories: {e}");
            Vec::new()
        },
        |categories| categories.iter().map(CategoryCardView::from).collect(),
    );

    CategoriesIndexTemplate { categories }
}

/// Display category detail page with the products that reference it.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let category = match state.cosmic().get_category_by_slug(&slug).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                NotFoundTemplate {
                    message: "Category not found.".to_string(),
                },
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch category {slug}: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorTemplate {
                    message: "An error occurred loading this category.".to_string(),
                },
            )
                .into_response();
        }
    };

    // Products reference categories by link; `id()` is available whether
    // the link arrived embedded or as a bare ID.
    let products = state.cosmic().get_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch products for category {slug}: {e}");
            Vec::new()
        },
        |products| {
            products
                .iter()
                .filter(|p| {
                    p.metadata
                        .category
                        .as_ref()
                        .is_some_and(|link| link.id() == category.id)
                })
                .map(ProductCardView::from)
                .collect()
        },
    );

    CategoryShowTemplate {
        category: CategoryCardView::from(&category),
        products,
    }
    .into_response()
}
