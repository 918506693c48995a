//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use stride_core::catalog::HomepageSection;

use crate::filters;
use crate::imgix;
use crate::state::AppState;

pub use super::collections::CollectionCardView;
pub use super::products::ProductCardView;

/// A hero banner slide sourced from an editor-managed section.
#[derive(Clone)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
    pub image_url: String,
}

impl From<&HomepageSection> for HeroView {
    fn from(section: &HomepageSection) -> Self {
        Self {
            title: section.metadata.title.clone(),
            subtitle: section.metadata.subtitle.clone().unwrap_or_default(),
            cta_text: section.metadata.cta_text.clone().unwrap_or_default(),
            cta_link: section.metadata.cta_link.clone().unwrap_or_default(),
            image_url: section
                .metadata
                .background_image
                .as_ref()
                .map(|img| imgix::hero(img.display_url()))
                .unwrap_or_default(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Hero sections, in editor-defined order.
    pub heroes: Vec<HeroView>,
    /// Collections flagged for the homepage.
    pub featured_collections: Vec<CollectionCardView>,
    /// Products flagged as featured.
    pub featured_products: Vec<ProductCardView>,
}

/// Display the home page.
///
/// Each section degrades independently: a failed fetch logs and renders
/// that section empty rather than failing the page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (sections, featured_collections, featured_products) = tokio::join!(
        state.cosmic().get_homepage_sections(),
        state.cosmic().get_featured_collections(),
        state.cosmic().get_featured_products(),
    );

    let heroes = sections.map_or_else(
        |e| {
            tracing::error!("Failed to fetch homepage sections: {e}");
            Vec::new()
        },
        |sections| {
            sections
                .iter()
                .filter(|s| s.is_hero())
                .map(HeroView::from)
                .collect()
        },
    );

    let featured_collections = featured_collections.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured collections: {e}");
            Vec::new()
        },
        |collections| collections.iter().map(CollectionCardView::from).collect(),
    );

    let featured_products = featured_products.map_or_else(
        |e| {
            tracing::error!("Failed to fetch featured products: {e}");
            Vec::new()
        },
        |products| products.iter().map(ProductCardView::from).collect(),
    );

    HomeTemplate {
        heroes,
        featured_collections,
        featured_products,
    }
}
