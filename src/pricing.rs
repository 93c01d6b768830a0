//! Order Pricing
//!
//! Pure computation over cart line items and the active discount rate. No
//! side effects, safe to call on every render. Rounding happens only at
//! presentation time; repeated recomputation never compounds rounding
//! error.

use crate::cart::models::CartLineItem;

/// Flat tax estimate shown on the order summary. Not a real tax
/// computation.
pub const TAX_RATE: f64 = 0.15;

/// Derived totals for the order summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of `price * quantity` over the cart line items.
    pub subtotal: f64,
    /// `subtotal * discount_rate`.
    pub discount_amount: f64,
    /// Informational tax line, derived from the payable total but not
    /// added to it. The storefront displays it the way it displays "free
    /// shipping"; preserved as-is.
    pub tax_estimate: f64,
    /// The amount actually charged: `subtotal - discount_amount`.
    pub total: f64,
}

impl Totals {
    /// Presentation form, every field rounded to 2 decimal places.
    pub fn rounded(self) -> Totals {
        Totals {
            subtotal: round2(self.subtotal),
            discount_amount: round2(self.discount_amount),
            tax_estimate: round2(self.tax_estimate),
            total: round2(self.total),
        }
    }
}

/// Computes the order summary for `items` under `discount_rate` in `[0, 1]`.
/// Saved-for-later items must not be passed in; they never count.
pub fn compute_totals(items: &[CartLineItem], discount_rate: f64) -> Totals {
    let subtotal: f64 = items.iter().map(CartLineItem::line_total).sum();
    let discount_amount = subtotal * discount_rate;
    let total = subtotal - discount_amount;
    let tax_estimate = total * TAX_RATE;

    Totals {
        subtotal,
        discount_amount,
        tax_estimate,
        total,
    }
}

/// Rounds to 2 decimal places. Presentation only.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::{CartLineItem, Product};

    fn item(price: f64, quantity: u32) -> CartLineItem {
        CartLineItem::from_product(
            &Product {
                product_id: 1,
                name: "Flyer pack".into(),
                price,
                stock: 100,
                image: String::new(),
                description: String::new(),
            },
            quantity,
        )
    }

    #[test]
    fn twenty_percent_off_a_hundred() {
        let items = vec![item(25.0, 4)];
        let totals = compute_totals(&items, 0.20).rounded();
        assert_eq!(totals.subtotal, 100.00);
        assert_eq!(totals.discount_amount, 20.00);
        assert_eq!(totals.total, 80.00);
    }

    #[test]
    fn tax_line_is_informational_only() {
        // The displayed tax is derived from the payable total but is not
        // added to it. Intentional storefront behavior; this test pins it
        // so nobody "fixes" it silently.
        let items = vec![item(25.0, 4)];
        let totals = compute_totals(&items, 0.20);
        assert_eq!(totals.tax_estimate, 12.0);
        assert_eq!(totals.total, 80.0);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = compute_totals(&[], 0.5);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn rounding_is_presentation_only() {
        let items = vec![item(0.1, 3)];
        let totals = compute_totals(&items, 0.0);
        // Raw accumulation keeps the unrounded value...
        assert!((totals.subtotal - 0.30000000000000004).abs() < 1e-15);
        // ...and only the rounded view shows two decimals.
        assert_eq!(totals.rounded().subtotal, 0.30);
    }
}
