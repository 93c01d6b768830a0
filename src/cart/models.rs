//! Shopping Cart Domain Models
//!
//! Data structures shared by the cart store, the pricing engine and the
//! remote-API payloads. Field names follow the backend's snake_case wire
//! format (`product_id`, `client_id`).

use serde::{Deserialize, Serialize};

/// Returns the default quantity (1) for cart line items
fn default_quantity() -> u32 {
    1
}

/// A product record as served by the catalog API (`GET /products`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier
    pub product_id: u64,

    /// Display name of the product
    pub name: String,

    /// Unit price, non-negative
    pub price: f64,

    /// Units currently in stock; the upper bound for any cart quantity
    pub stock: u32,

    /// Product image URL
    #[serde(default)]
    pub image: String,

    /// Short product description
    #[serde(default)]
    pub description: String,
}

/// One line of the cart: a product snapshot plus the quantity the shopper
/// picked. The same type backs the saved-for-later collection.
///
/// Invariant after any store mutation: `1 <= quantity <= stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Unique key within the cart
    pub product_id: u64,

    /// Display name of the product
    pub name: String,

    /// Unit price at the time the item was added
    pub price: f64,

    /// Quantity of this item (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Stock ceiling carried along so quantity changes can be bounded
    /// without a catalog round trip
    pub stock: u32,

    /// Product image URL
    #[serde(default)]
    pub image: String,

    /// Short product description
    #[serde(default)]
    pub description: String,
}

impl CartLineItem {
    /// Builds a line item from a catalog product.
    ///
    /// The quantity is clamped into `1..=stock`; callers must reject
    /// products with zero stock before constructing a line item.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name.clone(),
            price: product.price,
            quantity: quantity.max(1).min(product.stock),
            stock: product.stock,
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }

    /// Line subtotal: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
