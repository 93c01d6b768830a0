//! Cart State Management
//!
//! [`CartStore`] is the single source of truth for the cart and the
//! saved-for-later collection. Every mutation follows the same discipline:
//! persist first, broadcast second, so a subscriber that re-reads the store
//! after a signal always observes at least the state the signal announced.

use tracing::debug;

use super::models::{CartLineItem, Product};
use super::notice::Notice;
use super::notifier::{CartNotifier, CartSignal};
use super::repository::CartRepository;

/// Outcome of a mutating cart operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEffect {
    /// Nothing changed; nothing was persisted or broadcast.
    Unchanged,
    /// The cart changed, optionally with an advisory notice for the shopper.
    Updated { notice: Option<Notice> },
}

impl CartEffect {
    fn updated() -> Self {
        CartEffect::Updated { notice: None }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, CartEffect::Updated { .. })
    }
}

/// The canonical owner of cart state.
///
/// Cloning is cheap and every clone shares the same repository and
/// notifier, mirroring how every view of the storefront shares one
/// persisted cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    repository: CartRepository,
    notifier: CartNotifier,
}

impl CartStore {
    pub fn new(repository: CartRepository, notifier: CartNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub fn repository(&self) -> &CartRepository {
        &self.repository
    }

    pub fn notifier(&self) -> &CartNotifier {
        &self.notifier
    }

    /// Current cart line items in insertion order. Missing or corrupt
    /// persisted state reads as an empty cart.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.repository.load_cart()
    }

    /// Current saved-for-later items. Not counted in totals or badges.
    pub fn saved_items(&self) -> Vec<CartLineItem> {
        self.repository.load_saved()
    }

    /// The badge number: total units across all cart line items.
    pub fn item_count(&self) -> u32 {
        self.items().iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Adds `quantity` units of `product` to the cart.
    ///
    /// An existing line for the same product grows by `quantity`, clamped
    /// so it never exceeds `stock`; otherwise a new line is appended. A
    /// product with zero stock is rejected outright.
    pub fn add(&self, product: &Product, quantity: u32) -> CartEffect {
        if product.stock == 0 {
            return CartEffect::Unchanged;
        }

        let mut items = self.items();
        match items
            .iter_mut()
            .find(|item| item.product_id == product.product_id)
        {
            Some(existing) => {
                let grown = existing
                    .quantity
                    .saturating_add(quantity.max(1))
                    .min(existing.stock);
                if grown == existing.quantity {
                    // Already at the stock ceiling.
                    return CartEffect::Unchanged;
                }
                existing.quantity = grown;
            }
            None => items.push(CartLineItem::from_product(product, quantity)),
        }

        debug!(product_id = product.product_id, "added to cart");
        self.commit(&items);
        CartEffect::updated()
    }

    /// Adjusts the quantity of the line item at `index` by `delta`.
    ///
    /// The change applies only when the new quantity stays within
    /// `1..=stock`; anything else (including an out-of-range index) is a
    /// no-op. Landing exactly on the stock ceiling attaches a low-stock
    /// notice — once per crossing, because the rejected follow-up attempt
    /// mutates nothing.
    pub fn change_quantity(&self, index: usize, delta: i64) -> CartEffect {
        let mut items = self.items();
        let Some(item) = items.get_mut(index) else {
            return CartEffect::Unchanged;
        };

        let new_quantity = i64::from(item.quantity) + delta;
        if new_quantity <= 0 || new_quantity > i64::from(item.stock) {
            return CartEffect::Unchanged;
        }

        item.quantity = new_quantity as u32;
        let notice =
            (item.quantity == item.stock).then(|| Notice::low_stock(&item.name, item.stock));

        self.commit(&items);
        CartEffect::Updated { notice }
    }

    /// Deletes the line item at `index`.
    ///
    /// Unconditional: the "are you sure?" confirmation belongs to the view.
    pub fn remove(&self, index: usize) -> CartEffect {
        let mut items = self.items();
        if index >= items.len() {
            return CartEffect::Unchanged;
        }

        let removed = items.remove(index);
        debug!(product_id = removed.product_id, "removed line item");
        self.commit(&items);
        CartEffect::updated()
    }

    /// Moves the cart line item at `index` into the saved-for-later
    /// collection. Both collections are persisted before the broadcast.
    pub fn save_for_later(&self, index: usize) -> CartEffect {
        let mut items = self.items();
        if index >= items.len() {
            return CartEffect::Unchanged;
        }

        let item = items.remove(index);
        let mut saved = self.saved_items();
        saved.push(item);

        self.repository.save_cart(&items);
        self.repository.save_saved(&saved);
        self.notifier.emit(CartSignal::CartUpdated);
        CartEffect::updated()
    }

    /// Moves the saved item at `index` back into the cart, appended at the
    /// end. The item kept the quantity it had when it was set aside.
    pub fn restore_from_saved(&self, index: usize) -> CartEffect {
        let mut saved = self.saved_items();
        if index >= saved.len() {
            return CartEffect::Unchanged;
        }

        let item = saved.remove(index);
        let mut items = self.items();
        items.push(item);

        self.repository.save_cart(&items);
        self.repository.save_saved(&saved);
        self.notifier.emit(CartSignal::CartUpdated);
        CartEffect::updated()
    }

    /// Empties the cart. Saved-for-later items are untouched.
    pub fn clear(&self) -> CartEffect {
        self.repository.save_cart(&[]);
        self.notifier.emit(CartSignal::CartUpdated);
        CartEffect::updated()
    }

    /// Empties the cart after a confirmed payment and tells every badge to
    /// reset its count.
    pub fn complete_order(&self) {
        self.repository.save_cart(&[]);
        self.notifier.emit(CartSignal::OrderCompleted);
    }

    /// Persist-then-broadcast, the ordering every mutation relies on.
    fn commit(&self, items: &[CartLineItem]) {
        self.repository.save_cart(items);
        self.notifier.emit(CartSignal::CartUpdated);
    }
}
