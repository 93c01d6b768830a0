//! Shopping Cart Domain Module
//!
//! Everything that owns cart state lives here, including:
//! - Domain models (products, cart line items)
//! - The persistence repository and its key-value backends
//! - The change broadcast channel
//! - Advisory notices
//! - The store itself, the single source of truth

pub mod models;
pub mod notice;
pub mod notifier;
pub mod repository;
pub mod store;

// Re-export commonly used types for convenience
pub use notifier::{CartNotifier, CartSignal};
pub use repository::CartRepository;
pub use store::{CartEffect, CartStore};
