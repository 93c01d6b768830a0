//! Checkout Orchestration
//!
//! Assembles the current cart, discount and identity into a
//! checkout-session request and hands the shopper off to the external
//! payment processor. Preventing duplicate submissions (a disabled button
//! while a request is in flight) is the view's duty; the orchestrator is
//! safe to retry because failure mutates nothing.

use std::sync::Arc;

use tracing::info;

use crate::cart::store::CartStore;
use crate::client::{ApiClient, OrderItem, OrderRequest};
use crate::error::{Error, Result};

/// Terminal state of a successful checkout: the browser performs a full
/// navigation to this URL on the external payment processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRedirect {
    pub url: String,
}

/// Builds and submits checkout sessions from the current cart state.
#[derive(Debug, Clone)]
pub struct CheckoutOrchestrator {
    api: Arc<ApiClient>,
    store: CartStore,
}

impl CheckoutOrchestrator {
    pub fn new(api: Arc<ApiClient>, store: CartStore) -> Self {
        Self { api, store }
    }

    /// Submits the current cart as a checkout session for `user_id`.
    ///
    /// An empty cart fails with [`Error::EmptyCart`] before any network
    /// traffic. The identity collaborator resolves the user to a client
    /// record ([`Error::UnresolvedClient`] when it cannot). On success the
    /// persisted discount is consumed exactly once and the returned URL is
    /// the shopper's next, and final, stop; the cart itself stays intact
    /// until the payment confirmation page calls
    /// [`CartStore::complete_order`]. On failure both cart and discount
    /// are left untouched so a retry keeps the coupon applied.
    pub async fn checkout(&self, user_id: u64) -> Result<CheckoutRedirect> {
        let items = self.store.items();
        if items.is_empty() {
            return Err(Error::EmptyCart);
        }

        let client = self.api.client_by_user(user_id).await?;
        let discount = self.store.repository().load_discount();

        let order = OrderRequest {
            client_id: client.client_id,
            items: items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            discount,
        };

        let session = self.api.create_checkout_session(&order).await?;

        // Only now is the coupon spent; a failed submission above keeps it
        // for the retry.
        self.store.repository().clear_discount();
        info!(client_id = client.client_id, "checkout session created");

        Ok(CheckoutRedirect { url: session.url })
    }
}
