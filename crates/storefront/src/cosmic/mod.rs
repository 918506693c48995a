//! Headless CMS client for the product catalog.
//!
//! # Architecture
//!
//! - The CMS is the source of truth - no local sync, direct REST calls
//! - Objects are fetched with `depth=1` so references arrive embedded
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - Upstream 404s are normalized to empty-list/`None` here, so route
//!   handlers only ever see real failures
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_storefront::cosmic::CosmicClient;
//!
//! let client = CosmicClient::new(&config.cosmic);
//!
//! let products = client.get_products().await?;
//! let shoe = client.get_product_by_slug("air-runner").await?;
//! ```

mod cache;
mod client;

pub use client::CosmicClient;

use thiserror::Error;

/// Errors that can occur when talking to the CMS.
///
/// A 404 from the CMS is not an error - it is normalized to an empty
/// result before this type is ever constructed.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The CMS returned a non-success status other than 404.
    #[error("CMS returned {status}: {message}")]
    Api { status: u16, message: String },
}
