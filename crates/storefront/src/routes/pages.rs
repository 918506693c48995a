//! CMS content page route handlers.
//!
//! Content pages (help, legal, company, promotions) live at root-level
//! slugs and render pre-authored HTML from the CMS.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::routes::{ErrorTemplate, NotFoundTemplate};
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct ContentPageTemplate {
    pub title: String,
    pub content_html: String,
}

/// Display a content page by slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.cosmic().get_content_page_by_slug(&slug).await {
        Ok(Some(page)) => ContentPageTemplate {
            title: page.metadata.title.clone(),
            content_html: page.metadata.content.clone().unwrap_or_default(),
        }
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                message: "Page not found.".to_string(),
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch content page {slug}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorTemplate {
                    message: "An error occurred loading this page.".to_string(),
                },
            )
                .into_response()
        }
    }
}
