//! Print-Shop Cart Engine
//!
//! This library provides the client-side shopping cart and pricing engine
//! for the print-shop storefront: cart state with a saved-for-later
//! collection, coupon discounts, pure total computation and the hand-off to
//! the hosted payment checkout.
//!
//! The flow mirrors the storefront: a UI action mutates the [`CartStore`],
//! which persists through its [`CartRepository`] and then broadcasts on the
//! [`CartNotifier`]; every subscribed view re-reads the store and recomputes
//! totals with [`pricing::compute_totals`]. The [`CouponAgent`] and
//! [`CheckoutOrchestrator`] talk to the remote APIs through one shared
//! [`ApiClient`].

// Domain modules
pub mod cart;
pub mod checkout;
pub mod coupon;
pub mod pricing;

// Infrastructure
pub mod client;
pub mod error;

pub use crate::cart::models::{CartLineItem, Product};
pub use crate::cart::notice::{Notice, Severity, DEFAULT_NOTICE_TTL};
pub use crate::cart::notifier::{CartNotifier, CartSignal, CartSubscription};
pub use crate::cart::repository::{CartRepository, JsonFileStore, KvStore, MemoryStore};
pub use crate::cart::store::{CartEffect, CartStore};
pub use crate::checkout::{CheckoutOrchestrator, CheckoutRedirect};
pub use crate::client::{ApiClient, CheckoutSession, ClientRecord, CouponValidation, OrderItem, OrderRequest};
pub use crate::coupon::CouponAgent;
pub use crate::error::{Error, Result};
pub use crate::pricing::{compute_totals, round2, Totals, TAX_RATE};
