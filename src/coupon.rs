//! Coupon Handling
//!
//! Validates a coupon code against the remote Coupon API and converts the
//! granted percentage into the persisted discount rate. The rate in
//! `[0, 1]` is the canonical representation; the percentage exists only
//! for display.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cart::repository::CartRepository;
use crate::client::ApiClient;
use crate::error::Result;

/// Applies coupon codes to the cart's discount state.
#[derive(Debug, Clone)]
pub struct CouponAgent {
    api: Arc<ApiClient>,
    repository: CartRepository,
}

impl CouponAgent {
    pub fn new(api: Arc<ApiClient>, repository: CartRepository) -> Self {
        Self { api, repository }
    }

    /// Validates `code` and activates its discount.
    ///
    /// On success the rate (`percentage / 100`) is persisted, overwriting
    /// any previously active rate, and returned to the caller. Marking the
    /// coupon used is fire-and-forget: the backend re-validates the coupon
    /// at checkout time, so a lost usage report never rolls back the local
    /// discount. A rejected code fails with
    /// [`Error::InvalidCoupon`](crate::Error::InvalidCoupon).
    pub async fn apply(&self, code: &str) -> Result<f64> {
        let validation = self.api.validate_coupon(code).await?;

        let rate = (validation.discount / 100.0).clamp(0.0, 1.0);
        self.repository.save_discount(rate);
        info!(code = %validation.code, rate, "coupon applied");

        let api = Arc::clone(&self.api);
        let used_code = validation.code;
        tokio::spawn(async move {
            if let Err(err) = api.use_coupon(&used_code).await {
                warn!(code = %used_code, %err, "failed to record coupon usage");
            }
        });

        Ok(rate)
    }

    /// Currently active rate in `[0, 1]`; 0.0 when no coupon is applied.
    pub fn active_rate(&self) -> f64 {
        self.repository.load_discount()
    }

    /// Percentage for display only. `None` when no discount is active.
    pub fn active_percentage(&self) -> Option<f64> {
        let rate = self.active_rate();
        (rate > 0.0).then_some(rate * 100.0)
    }
}
