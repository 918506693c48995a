//! Catalog entity types as served by the headless CMS.
//!
//! Every object the CMS returns shares the same envelope (`id`, `slug`,
//! `title`, `created_at`) and carries a per-type `metadata` record. The
//! metadata shapes here are explicit: required fields are plain, optional
//! fields are `Option`, and list/flag fields tolerate both missing and
//! `null` values so a half-filled CMS entry never fails the whole fetch.
//!
//! References between objects (`category`, `collection`,
//! `parent_category`) arrive either as an embedded object (`depth=1`) or
//! as a bare ID string. [`Link`] normalizes that at the deserialization
//! boundary so downstream code never has to branch on the wire shape.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default value.
///
/// The CMS emits `null` for cleared optional fields; combined with
/// `#[serde(default)]` this also covers fields that are absent entirely.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Shared building blocks
// =============================================================================

/// Common accessors for catalog objects, used by [`Link`] to expose a
/// uniform view over embedded references.
pub trait CatalogEntry {
    /// Stable object ID assigned by the CMS.
    fn id(&self) -> &str;
    /// URL slug.
    fn slug(&self) -> &str;
    /// Human-readable name, falling back to the object title.
    fn display_name(&self) -> &str;
}

/// A reference to another catalog object.
///
/// The CMS returns references as a full embedded object when the query
/// was made with `depth=1`, and as a bare ID string otherwise. Both
/// shapes parse into this enum; `id()` works for either variant, while
/// slug and name lookups are only available on embedded links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link<T> {
    /// Fully embedded object.
    Embedded(Box<T>),
    /// Bare object ID.
    Id(String),
}

impl<T: CatalogEntry> Link<T> {
    /// The referenced object's ID (available for both variants).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Embedded(entry) => entry.id(),
            Self::Id(id) => id,
        }
    }

    /// The referenced object's slug, if the link is embedded.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.embedded().map(CatalogEntry::slug)
    }

    /// The referenced object's display name, if the link is embedded.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.embedded().map(CatalogEntry::display_name)
    }

    /// The embedded object, if present.
    #[must_use]
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Self::Embedded(entry) => Some(entry),
            Self::Id(_) => None,
        }
    }
}

/// An uploaded media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Original upload URL.
    pub url: String,
    /// CDN URL suitable for on-the-fly resizing parameters.
    #[serde(default)]
    pub imgix_url: String,
}

impl ImageAsset {
    /// The URL to derive display sizes from (CDN when available).
    #[must_use]
    pub fn display_url(&self) -> &str {
        if self.imgix_url.is_empty() {
            &self.url
        } else {
            &self.imgix_url
        }
    }
}

/// A select-dropdown value: a machine key plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption<K> {
    pub key: K,
    #[serde(default)]
    pub value: String,
}

// =============================================================================
// Products
// =============================================================================

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub metadata: ProductMetadata,
}

/// Product metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    /// Unit price in the store currency. Missing prices read as zero.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    pub category: Option<Link<Category>>,
    pub collection: Option<Link<Collection>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageAsset>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sizes: Vec<String>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    /// Stock flag. `Some(true)` is required by the in-stock filter;
    /// only an explicit `Some(false)` renders as out of stock.
    pub in_stock: Option<bool>,
}

impl Product {
    /// Name of the embedded category, when the reference is embedded.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.metadata.category.as_ref().and_then(Link::display_name)
    }

    /// First product image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ImageAsset> {
        self.metadata.images.first()
    }

    /// Whether the product may be added to the cart.
    #[must_use]
    pub fn available(&self) -> bool {
        self.metadata.in_stock != Some(false)
    }
}

impl CatalogEntry for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.title
        } else {
            &self.metadata.name
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Category placement in the navigation hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Main,
    Subcategory,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub metadata: CategoryMetadata,
}

/// Category metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub category_type: Option<SelectOption<CategoryKind>>,
    pub parent_category: Option<Link<Category>>,
    pub image: Option<ImageAsset>,
}

impl Category {
    /// Whether this is a top-level navigation category.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.metadata
            .category_type
            .as_ref()
            .is_some_and(|t| t.key == CategoryKind::Main)
    }
}

impl CatalogEntry for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.title
        } else {
            &self.metadata.name
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

/// A merchandised product collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub metadata: CollectionMetadata,
}

/// Collection metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub hero_image: Option<ImageAsset>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_homepage: bool,
}

impl CatalogEntry for Collection {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.title
        } else {
            &self.metadata.name
        }
    }
}

// =============================================================================
// Homepage sections
// =============================================================================

/// The kind of homepage section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Featured,
    Promotional,
}

/// An editor-managed homepage section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageSection {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub metadata: SectionMetadata,
}

/// Homepage section metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<ImageAsset>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section_order: i64,
    pub section_type: Option<SelectOption<SectionKind>>,
}

impl HomepageSection {
    /// Whether this section renders as a hero banner.
    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.metadata
            .section_type
            .as_ref()
            .is_some_and(|t| t.key == SectionKind::Hero)
    }
}

// =============================================================================
// Content pages
// =============================================================================

/// The kind of content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Help,
    Company,
    Legal,
    Promotion,
}

/// An editor-managed content page (help, legal, company, promotion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPage {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub metadata: PageMetadata,
}

/// Content page metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Page body as pre-rendered HTML.
    pub content: Option<String>,
    pub page_type: Option<SelectOption<PageKind>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_with_embedded_category() {
        let json = r#"{
            "id": "prod-1",
            "slug": "air-runner",
            "title": "Air Runner",
            "created_at": "2024-03-01T12:00:00.000Z",
            "metadata": {
                "name": "Air Runner",
                "description": "Lightweight road shoe",
                "price": 129.99,
                "category": {
                    "id": "cat-1",
                    "slug": "shoes",
                    "title": "Shoes",
                    "created_at": "2024-01-01T00:00:00.000Z",
                    "metadata": { "name": "Shoes" }
                },
                "images": [{ "url": "https://cdn.example/a.jpg", "imgix_url": "https://imgix.example/a.jpg" }],
                "sizes": ["9", "10"],
                "color": "White",
                "featured": true,
                "in_stock": true
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.display_name(), "Air Runner");
        assert_eq!(product.metadata.price, "129.99".parse().unwrap());
        let category = product.metadata.category.as_ref().unwrap();
        assert_eq!(category.id(), "cat-1");
        assert_eq!(category.slug(), Some("shoes"));
        assert_eq!(product.category_name(), Some("Shoes"));
        assert!(product.available());
    }

    #[test]
    fn link_normalizes_bare_id_references() {
        let json = r#"{
            "id": "prod-2",
            "slug": "trail-pro",
            "title": "Trail Pro",
            "created_at": "2024-03-02T12:00:00.000Z",
            "metadata": {
                "name": "Trail Pro",
                "price": 89,
                "category": "cat-9"
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        let category = product.metadata.category.as_ref().unwrap();
        assert_eq!(category.id(), "cat-9");
        assert_eq!(category.slug(), None);
        assert_eq!(product.category_name(), None);
    }

    #[test]
    fn nulls_and_missing_fields_read_as_defaults() {
        let json = r#"{
            "id": "prod-3",
            "slug": "bare",
            "title": "Bare Product",
            "created_at": "2024-03-03T12:00:00.000Z",
            "metadata": {
                "name": null,
                "price": null,
                "images": null,
                "sizes": null,
                "featured": null,
                "in_stock": null
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.display_name(), "Bare Product");
        assert_eq!(product.metadata.price, Decimal::ZERO);
        assert!(product.metadata.images.is_empty());
        assert!(product.metadata.sizes.is_empty());
        assert!(!product.metadata.featured);
        assert_eq!(product.metadata.in_stock, None);
        // Missing flag renders as available but fails the in-stock filter.
        assert!(product.available());
    }

    #[test]
    fn category_type_select_parses_key_and_value() {
        let json = r#"{
            "id": "cat-1",
            "slug": "shoes",
            "title": "Shoes",
            "created_at": "2024-01-01T00:00:00.000Z",
            "metadata": {
                "name": "Shoes",
                "category_type": { "key": "main", "value": "Main Category" }
            }
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert!(category.is_main());
    }

    #[test]
    fn section_kind_gates_hero_rendering() {
        let json = r#"{
            "id": "sec-1",
            "slug": "spring-hero",
            "title": "Spring Hero",
            "created_at": "2024-02-01T00:00:00.000Z",
            "metadata": {
                "title": "Run Into Spring",
                "section_order": 1,
                "section_type": { "key": "hero", "value": "Hero Section" }
            }
        }"#;

        let section: HomepageSection = serde_json::from_str(json).unwrap();
        assert!(section.is_hero());
        assert_eq!(section.metadata.section_order, 1);
    }

    #[test]
    fn image_display_url_prefers_cdn() {
        let cdn = ImageAsset {
            url: "https://cdn.example/raw.jpg".to_string(),
            imgix_url: "https://imgix.example/raw.jpg".to_string(),
        };
        assert_eq!(cdn.display_url(), "https://imgix.example/raw.jpg");

        let plain = ImageAsset {
            url: "https://cdn.example/raw.jpg".to_string(),
            imgix_url: String::new(),
        };
        assert_eq!(plain.display_url(), "https://cdn.example/raw.jpg");
    }
}
