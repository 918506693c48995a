//! Fixture catalog served by the mock CMS.
//!
//! Three products across two categories and one collection, plus a hero
//! section and a content page. References are embedded the way a
//! `depth=1` fetch returns them.

use serde_json::{Value, json};

/// The embedded "Shoes" category object.
#[must_use]
pub fn shoes_category() -> Value {
    json!({
        "id": "cat-shoes",
        "type": "categories",
        "slug": "shoes",
        "title": "Shoes",
        "created_at": "2024-01-01T00:00:00.000Z",
        "metadata": {
            "name": "Shoes",
            "description": "Footwear for every surface",
            "category_type": { "key": "main", "value": "Main Category" }
        }
    })
}

/// The embedded "Apparel" category object.
#[must_use]
pub fn apparel_category() -> Value {
    json!({
        "id": "cat-apparel",
        "type": "categories",
        "slug": "apparel",
        "title": "Apparel",
        "created_at": "2024-01-02T00:00:00.000Z",
        "metadata": {
            "name": "Apparel",
            "category_type": { "key": "subcategory", "value": "Subcategory" }
        }
    })
}

/// The embedded "Jumpman" collection object.
#[must_use]
pub fn jumpman_collection() -> Value {
    json!({
        "id": "col-jumpman",
        "type": "collections",
        "slug": "jumpman",
        "title": "Jumpman",
        "created_at": "2024-01-03T00:00:00.000Z",
        "metadata": {
            "name": "Jumpman",
            "tagline": "Flight heritage",
            "hero_image": {
                "url": "https://cdn.example/jumpman.jpg",
                "imgix_url": "https://imgix.example/jumpman.jpg"
            },
            "featured_homepage": true
        }
    })
}

/// The full fixture catalog.
#[must_use]
pub fn catalog() -> Vec<Value> {
    vec![
        shoes_category(),
        apparel_category(),
        jumpman_collection(),
        json!({
            "id": "prod-jordan-1",
            "type": "products",
            "slug": "jordan-1",
            "title": "Jordan 1",
            "created_at": "2024-03-03T00:00:00.000Z",
            "metadata": {
                "name": "Jordan 1",
                "description": "The original high-top, back again",
                "price": 150,
                "category": shoes_category(),
                "collection": jumpman_collection(),
                "images": [{
                    "url": "https://cdn.example/jordan-1.jpg",
                    "imgix_url": "https://imgix.example/jordan-1.jpg"
                }],
                "sizes": ["9", "10"],
                "color": "Red",
                "featured": true,
                "in_stock": true
            }
        }),
        json!({
            "id": "prod-jordan-4",
            "type": "products",
            "slug": "jordan-4",
            "title": "Jordan 4",
            "created_at": "2024-03-05T00:00:00.000Z",
            "metadata": {
                "name": "Jordan 4",
                "description": "Visible air, visible style",
                "price": 200,
                "category": shoes_category(),
                "images": [{
                    "url": "https://cdn.example/jordan-4.jpg",
                    "imgix_url": "https://imgix.example/jordan-4.jpg"
                }],
                "sizes": ["10", "11"],
                "color": "Black",
                "featured": false,
                "in_stock": true
            }
        }),
        json!({
            "id": "prod-court-classic",
            "type": "products",
            "slug": "court-classic",
            "title": "Court Classic",
            "created_at": "2024-03-09T00:00:00.000Z",
            "metadata": {
                "name": "Court Classic",
                "description": "A warm-up layer for cold mornings",
                "price": 95,
                "category": apparel_category(),
                "sizes": ["m", "l"],
                "color": "White",
                "featured": false,
                "in_stock": false
            }
        }),
        json!({
            "id": "sec-spring-hero",
            "type": "homepage-sections",
            "slug": "spring-hero",
            "title": "Spring Hero",
            "created_at": "2024-02-01T00:00:00.000Z",
            "metadata": {
                "title": "Run Into Spring",
                "subtitle": "New colorways for longer days",
                "background_image": {
                    "url": "https://cdn.example/spring.jpg",
                    "imgix_url": "https://imgix.example/spring.jpg"
                },
                "cta_text": "Shop the drop",
                "cta_link": "/collections/jumpman",
                "section_order": 1,
                "section_type": { "key": "hero", "value": "Hero Section" }
            }
        }),
        json!({
            "id": "sec-promo",
            "type": "homepage-sections",
            "slug": "gift-promo",
            "title": "Gift Promo",
            "created_at": "2024-02-02T00:00:00.000Z",
            "metadata": {
                "title": "Gifts for Runners",
                "section_order": 2,
                "section_type": { "key": "promotional", "value": "Promotional Banner" }
            }
        }),
        json!({
            "id": "page-about",
            "type": "content-pages",
            "slug": "about-us",
            "title": "About Us",
            "created_at": "2024-01-05T00:00:00.000Z",
            "metadata": {
                "title": "About Stride",
                "content": "<p>Stride builds performance gear for everyday athletes.</p>",
                "page_type": { "key": "company", "value": "Company" }
            }
        }),
    ]
}
