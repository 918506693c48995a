//! Cache types for CMS responses.

use stride_core::catalog::{Category, Collection, ContentPage, HomepageSection, Product};

/// Cached value types, one per read operation shape.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<Category>),
    Category(Box<Category>),
    Collections(Vec<Collection>),
    Collection(Box<Collection>),
    Sections(Vec<HomepageSection>),
    Pages(Vec<ContentPage>),
    Page(Box<ContentPage>),
}
