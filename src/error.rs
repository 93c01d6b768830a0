//! Error taxonomy for the cart engine
//!
//! Nothing here is fatal: every failure degrades to an inert cart/discount
//! state and an auto-expiring banner. Stock overruns are clamped rather
//! than raised, and corrupt persisted state reads as empty, so neither has
//! a variant.

use crate::cart::notice::Notice;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Checkout was attempted with nothing in the cart. No network call is
    /// made.
    #[error("the cart is empty")]
    EmptyCart,

    /// The remote validator rejected the coupon code: invalid, expired or
    /// usage-exhausted. The engine does not distinguish the three.
    #[error("coupon is invalid, expired or exhausted")]
    InvalidCoupon,

    /// The bearer credential did not resolve to a client record.
    #[error("no client record found for the current user")]
    UnresolvedClient,

    /// The remote API answered with an unexpected status.
    #[error("remote API returned status {status}")]
    Status { status: u16 },

    /// Transport-level failure. Retry-able; state is left untouched.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// True when retrying the same call without changing anything may
    /// succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Status { .. })
    }

    /// The user-facing banner for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Error::EmptyCart => Notice::warning("Your cart is empty."),
            Error::InvalidCoupon => {
                Notice::warning("Coupon is invalid, expired or has no uses left.")
            }
            _ => Notice::error("There was a problem processing your order. Please try again."),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
