//! Session cart store.
//!
//! The cart is a flat list of line items keyed by `(product_id, size)`.
//! Totals are derived on every read, never cached. The whole cart
//! serializes to a plain JSON array so it can live under a single
//! durable-storage key; a corrupt payload is the caller's cue to start
//! from an empty cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Durable-storage key under which the serialized cart lives.
pub const CART_STORAGE_KEY: &str = "stride-cart";

/// One cart entry: a distinct `(product, size)` selection and its
/// quantity. Snapshotted from the catalog at add time so the cart stays
/// renderable even if the product later disappears upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price contribution of this line (`unit_price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn matches(&self, product_id: &str, size: Option<&str>) -> bool {
        self.product_id == product_id && self.size.as_deref() == size
    }
}

/// The cart state for one browser session.
///
/// Invariant: at most one line per `(product_id, size)` pair, in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same `(product_id, size)` already exists its
    /// quantity is incremented; otherwise the line is appended. A zero
    /// incoming quantity is bumped to one — lines always represent at
    /// least one unit.
    pub fn add(&mut self, line: CartLine) {
        let quantity = line.quantity.max(1);

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&line.product_id, line.size.as_deref()))
        {
            existing.quantity += quantity;
        } else {
            self.lines.push(CartLine { quantity, ..line });
        }
    }

    /// Remove the matching line. Removing an absent line is a no-op,
    /// not an error.
    pub fn remove(&mut self, product_id: &str, size: Option<&str>) {
        self.lines.retain(|l| !l.matches(product_id, size));
    }

    /// Replace the matching line's quantity in place; zero behaves as
    /// [`Self::remove`]. Updating an absent line is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32, size: Option<&str>) {
        if quantity == 0 {
            self.remove(product_id, size);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(product_id, size)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total unit count across all lines. Recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total price across all lines. Recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Serialize for durable storage (a JSON array of lines).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rehydrate from a durable-storage payload.
    ///
    /// # Errors
    ///
    /// Returns an error on a corrupt payload; callers treat that as an
    /// empty cart rather than propagating.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
