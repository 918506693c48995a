//! Display-size image URL derivation.
//!
//! CMS assets come back as full-resolution CDN URLs; display variants
//! are derived by appending resize parameters. A pure string transform,
//! kept out of the templates so the sizes used across the site live in
//! one place.

/// Append resize parameters for a `width`×`height` crop.
#[must_use]
pub fn resize(url: &str, width: u32, height: u32) -> String {
    if url.is_empty() {
        return String::new();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}w={width}&h={height}&fit=crop&auto=format,compress")
}

/// Card-size variant for product grids.
#[must_use]
pub fn card(url: &str) -> String {
    resize(url, 600, 600)
}

/// Thumbnail variant for cart lines and image strips.
#[must_use]
pub fn thumb(url: &str) -> String {
    resize(url, 200, 200)
}

/// Full-size variant for product detail pages.
#[must_use]
pub fn detail(url: &str) -> String {
    resize(url, 800, 800)
}

/// Wide variant for collection and section hero banners.
#[must_use]
pub fn hero(url: &str) -> String {
    resize(url, 1920, 800)
}
