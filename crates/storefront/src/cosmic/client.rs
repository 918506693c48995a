//! CMS REST client implementation.
//!
//! Queries the object store with JSON predicates (`type`, `slug`,
//! `metadata.*`) and caches read results with `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use stride_core::catalog::{Category, Collection, ContentPage, HomepageSection, Product};

use crate::config::CosmicConfig;
use crate::cosmic::CmsError;
use crate::cosmic::cache::CacheValue;

/// Envelope fields requested for every object.
const PROPS: &str = "id,slug,title,metadata,created_at";

/// Upper bound on objects per fetch. The catalog is small and static;
/// the pipeline works on the full set, so there is no pagination.
const FETCH_LIMIT: &str = "1000";

/// List response envelope.
#[derive(Debug, Deserialize)]
struct ObjectsEnvelope<T> {
    #[serde(default)]
    objects: Vec<T>,
}

// =============================================================================
// CosmicClient
// =============================================================================

/// Client for the headless CMS object store.
///
/// Provides typed, cached access to products, categories, collections,
/// homepage sections, and content pages. Cheaply cloneable.
#[derive(Clone)]
pub struct CosmicClient {
    inner: Arc<CosmicClientInner>,
}

struct CosmicClientInner {
    client: reqwest::Client,
    objects_url: String,
    read_key: String,
    cache: Cache<String, CacheValue>,
}

impl CosmicClient {
    /// Create a new CMS client.
    #[must_use]
    pub fn new(config: &CosmicConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let objects_url = format!("{}/buckets/{}/objects", config.api_url, config.bucket_slug);

        Self {
            inner: Arc::new(CosmicClientInner {
                client: reqwest::Client::new(),
                objects_url,
                read_key: config.read_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Fetch all objects matching a query predicate.
    ///
    /// A 404 from the CMS means "no objects of this kind exist" and is
    /// returned as an empty list, not an error.
    async fn find<T: DeserializeOwned>(&self, query: &Value) -> Result<Vec<T>, CmsError> {
        let response = self
            .inner
            .client
            .get(&self.inner.objects_url)
            .query(&[
                ("query", query.to_string().as_str()),
                ("props", PROPS),
                ("depth", "1"),
                ("limit", FETCH_LIMIT),
                ("read_key", self.inner.read_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "CMS returned non-success status"
            );
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        let envelope: ObjectsEnvelope<T> = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse CMS response"
                );
                return Err(CmsError::Parse(e));
            }
        };

        Ok(envelope.objects)
    }

    /// Fetch a single object by type and slug.
    async fn find_one<T: DeserializeOwned>(
        &self,
        object_type: &str,
        slug: &str,
    ) -> Result<Option<T>, CmsError> {
        let objects = self
            .find::<T>(&json!({ "type": object_type, "slug": slug }))
            .await?;
        Ok(objects.into_iter().next())
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CmsError> {
        const CACHE_KEY: &str = "products";

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let mut products: Vec<Product> = self.find(&json!({ "type": "products" })).await?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.inner
            .cache
            .insert(CACHE_KEY.to_string(), CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self) -> Result<Vec<Product>, CmsError> {
        const CACHE_KEY: &str = "products:featured";

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .find(&json!({ "type": "products", "metadata.featured": true }))
            .await?;

        self.inner
            .cache
            .insert(CACHE_KEY.to_string(), CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// A product by slug, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CmsError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let Some(product) = self.find_one::<Product>("products", slug).await? else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(Some(product))
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CmsError> {
        const CACHE_KEY: &str = "categories";

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.find(&json!({ "type": "categories" })).await?;

        self.inner
            .cache
            .insert(
                CACHE_KEY.to_string(),
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// Top-level navigation categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_main_categories(&self) -> Result<Vec<Category>, CmsError> {
        const CACHE_KEY: &str = "categories:main";

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for main categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self
            .find(&json!({ "type": "categories", "metadata.category_type": "main" }))
            .await?;

        self.inner
            .cache
            .insert(
                CACHE_KEY.to_string(),
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// A category by slug, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError> {
        let cache_key = format!("category:{slug}");

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(Some(*category));
        }

        let Some(category) = self.find_one::<Category>("categories", slug).await? else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(Some(category))
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// All collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, CmsError> {
        const CACHE_KEY: &str = "collections";

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let collections: Vec<Collection> = self.find(&json!({ "type": "collections" })).await?;

        self.inner
            .cache
            .insert(
                CACHE_KEY.to_string(),
                CacheValue::Collections(collections.clone()),
            )
            .await;

        Ok(collections)
    }

    /// Collections featured on the homepage.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_collections(&self) -> Result<Vec<Collection>, CmsError> {
        const CACHE_KEY: &str = "collections:featured";

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for featured collections");
            return Ok(collections);
        }

        let collections: Vec<Collection> = self
            .find(&json!({ "type": "collections", "metadata.featured_homepage": true }))
            .await?;

        self.inner
            .cache
            .insert(
                CACHE_KEY.to_string(),
                CacheValue::Collections(collections.clone()),
            )
            .await;

        Ok(collections)
    }

    /// A collection by slug, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_collection_by_slug(&self, slug: &str) -> Result<Option<Collection>, CmsError> {
        let cache_key = format!("collection:{slug}");

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(Some(*collection));
        }

        let Some(collection) = self.find_one::<Collection>("collections", slug).await? else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(Some(collection))
    }

    // =========================================================================
    // Homepage Sections
    // =========================================================================

    /// Homepage sections in editor-defined order.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_homepage_sections(&self) -> Result<Vec<HomepageSection>, CmsError> {
        const CACHE_KEY: &str = "sections";

        if let Some(CacheValue::Sections(sections)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for homepage sections");
            return Ok(sections);
        }

        let mut sections: Vec<HomepageSection> =
            self.find(&json!({ "type": "homepage-sections" })).await?;
        sections.sort_by_key(|s| s.metadata.section_order);

        self.inner
            .cache
            .insert(CACHE_KEY.to_string(), CacheValue::Sections(sections.clone()))
            .await;

        Ok(sections)
    }

    // =========================================================================
    // Content Pages
    // =========================================================================

    /// All content pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self))]
    pub async fn get_content_pages(&self) -> Result<Vec<ContentPage>, CmsError> {
        const CACHE_KEY: &str = "pages";

        if let Some(CacheValue::Pages(pages)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for content pages");
            return Ok(pages);
        }

        let pages: Vec<ContentPage> = self.find(&json!({ "type": "content-pages" })).await?;

        self.inner
            .cache
            .insert(CACHE_KEY.to_string(), CacheValue::Pages(pages.clone()))
            .await;

        Ok(pages)
    }

    /// A content page by slug, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the CMS request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_content_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ContentPage>, CmsError> {
        let cache_key = format!("page:{slug}");

        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for content page");
            return Ok(Some(*page));
        }

        let Some(page) = self.find_one::<ContentPage>("content-pages", slug).await? else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(Box::new(page.clone())))
            .await;

        Ok(Some(page))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
