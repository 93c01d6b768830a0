//! Integration tests for the cart store
//!
//! These exercise the store invariants end to end over a shared in-memory
//! persisted store:
//! - quantity always within `1..=stock` after any mutation
//! - aggregation of repeated adds into a single line
//! - low-stock notice exactly once per crossing
//! - clear/saved-for-later isolation
//! - persistence round-trip across a simulated reload
//! - write-before-notify signal ordering

use std::sync::Arc;

use printshop_cart::{
    CartEffect, CartNotifier, CartRepository, CartSignal, CartStore, JsonFileStore, KvStore,
    MemoryStore, Product,
};

fn product(product_id: u64, price: f64, stock: u32) -> Product {
    Product {
        product_id,
        name: format!("Poster #{product_id}"),
        price,
        stock,
        image: String::new(),
        description: String::new(),
    }
}

fn store_over(kv: Arc<dyn KvStore>) -> CartStore {
    CartStore::new(CartRepository::new(kv), CartNotifier::new())
}

fn fresh_store() -> CartStore {
    store_over(Arc::new(MemoryStore::new()))
}

#[test]
fn adding_same_product_twice_aggregates_one_line() {
    let store = fresh_store();
    let poster = product(1, 9.99, 100);

    assert!(store.add(&poster, 1).is_updated());
    assert!(store.add(&poster, 1).is_updated());

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
}

#[test]
fn add_clamps_at_the_stock_ceiling() {
    let store = fresh_store();
    let poster = product(1, 9.99, 3);

    assert!(store.add(&poster, 5).is_updated());
    assert_eq!(store.items()[0].quantity, 3);

    // Already at the ceiling: nothing to grow, nothing broadcast.
    assert_eq!(store.add(&poster, 1), CartEffect::Unchanged);
    assert_eq!(store.items()[0].quantity, 3);
}

#[test]
fn zero_stock_products_are_rejected() {
    let store = fresh_store();
    assert_eq!(store.add(&product(1, 9.99, 0), 1), CartEffect::Unchanged);
    assert!(store.items().is_empty());
}

#[test]
fn quantity_never_leaves_bounds_under_mixed_operations() {
    let store = fresh_store();
    let poster = product(1, 5.0, 4);
    store.add(&poster, 2);

    for delta in [-10, -1, 1, 3, 5, -2, 100, -100, 1, 1, 1, 1] {
        store.change_quantity(0, delta);
        let item = &store.items()[0];
        assert!(item.quantity >= 1 && item.quantity <= item.stock);
    }
}

#[test]
fn decrement_below_one_is_a_noop() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 10), 1);

    assert_eq!(store.change_quantity(0, -1), CartEffect::Unchanged);
    assert_eq!(store.items()[0].quantity, 1);
}

#[test]
fn increment_past_stock_is_a_noop() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 2), 2);

    assert_eq!(store.change_quantity(0, 1), CartEffect::Unchanged);
    assert_eq!(store.items()[0].quantity, 2);
}

#[test]
fn low_stock_notice_fires_once_per_crossing() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 3), 2);

    // Crossing onto the ceiling carries the notice.
    match store.change_quantity(0, 1) {
        CartEffect::Updated { notice: Some(notice) } => {
            assert!(notice.message.contains("3 units"));
        }
        other => panic!("expected a low-stock notice, got {other:?}"),
    }

    // The follow-up attempt is rejected outright, so no second notice.
    assert_eq!(store.change_quantity(0, 1), CartEffect::Unchanged);

    // Stepping off and back on crosses again.
    assert_eq!(store.change_quantity(0, -1), CartEffect::Updated { notice: None });
    assert!(matches!(
        store.change_quantity(0, 1),
        CartEffect::Updated { notice: Some(_) }
    ));
}

#[test]
fn change_quantity_out_of_range_index_is_a_noop() {
    let store = fresh_store();
    assert_eq!(store.change_quantity(3, 1), CartEffect::Unchanged);
}

#[test]
fn remove_deletes_exactly_one_line() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 10), 1);
    store.add(&product(2, 7.0, 10), 1);

    assert!(store.remove(0).is_updated());
    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, 2);

    assert_eq!(store.remove(5), CartEffect::Unchanged);
}

#[test]
fn clear_leaves_saved_items_untouched() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 10), 2);
    store.add(&product(2, 7.0, 10), 1);
    store.save_for_later(1);

    store.clear();

    assert!(store.items().is_empty());
    assert_eq!(store.saved_items().len(), 1);
    assert_eq!(store.saved_items()[0].product_id, 2);
}

#[test]
fn save_for_later_moves_items_both_ways() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 10), 2);
    store.add(&product(2, 7.0, 10), 3);

    assert!(store.save_for_later(0).is_updated());
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.saved_items().len(), 1);

    // Saved items never count toward the badge.
    assert_eq!(store.item_count(), 3);

    assert!(store.restore_from_saved(0).is_updated());
    assert!(store.saved_items().is_empty());
    let items = store.items();
    assert_eq!(items.len(), 2);
    // Restored at the end, with the quantity it was set aside with.
    assert_eq!(items[1].product_id, 1);
    assert_eq!(items[1].quantity, 2);
}

#[test]
fn badge_count_sums_quantities() {
    let store = fresh_store();
    store.add(&product(1, 5.0, 10), 2);
    store.add(&product(2, 7.0, 10), 3);
    assert_eq!(store.item_count(), 5);
}

#[test]
fn persisted_cart_survives_a_reload() {
    let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

    let store = store_over(Arc::clone(&kv));
    store.add(&product(1, 5.0, 10), 2);
    store.add(&product(2, 7.0, 10), 1);
    store.change_quantity(1, 2);

    // A reload builds a brand new store over the same persisted state.
    let reloaded = store_over(kv);
    let items = reloaded.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id, 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[1].product_id, 2);
    assert_eq!(items[1].quantity, 3);
}

#[test]
fn corrupt_persisted_state_reads_as_empty() {
    let kv = Arc::new(MemoryStore::new());
    kv.set("cart", "definitely-not-json");
    kv.set("discount", "lots");

    let store = store_over(kv);
    assert!(store.items().is_empty());
    assert_eq!(store.repository().load_discount(), 0.0);

    // And the store is usable afterwards.
    assert!(store.add(&product(1, 5.0, 10), 1).is_updated());
    assert_eq!(store.items().len(), 1);
}

#[test]
fn discount_round_trips_through_the_repository() {
    let repository = CartRepository::in_memory();
    assert_eq!(repository.load_discount(), 0.0);

    repository.save_discount(0.2);
    assert_eq!(repository.load_discount(), 0.2);

    // Overwrite, then consume.
    repository.save_discount(0.1);
    assert_eq!(repository.load_discount(), 0.1);
    repository.clear_discount();
    assert_eq!(repository.load_discount(), 0.0);
}

#[test]
fn mutations_broadcast_after_the_write() {
    let store = fresh_store();
    let mut subscription = store.notifier().subscribe();

    store.add(&product(1, 5.0, 10), 1);
    assert_eq!(subscription.try_next(), Some(CartSignal::CartUpdated));
    // By the time the signal is observable the write is already durable.
    assert_eq!(store.items().len(), 1);

    // A rejected mutation emits nothing.
    store.change_quantity(0, -1);
    assert_eq!(subscription.try_next(), None);

    store.complete_order();
    assert_eq!(subscription.try_next(), Some(CartSignal::OrderCompleted));
    assert!(store.is_empty());
}

#[test]
fn json_file_store_survives_reloads_and_corruption() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storefront.json");

    let store = store_over(Arc::new(JsonFileStore::new(&path)));
    store.add(&product(1, 12.5, 8), 2);
    store.repository().save_discount(0.15);

    let reloaded = store_over(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reloaded.items()[0].quantity, 2);
    assert_eq!(reloaded.repository().load_discount(), 0.15);

    // A trashed file degrades to an empty cart, never a failure.
    std::fs::write(&path, "{{{{").expect("write garbage");
    let corrupted = store_over(Arc::new(JsonFileStore::new(&path)));
    assert!(corrupted.items().is_empty());
    assert!(corrupted.add(&product(2, 3.0, 5), 1).is_updated());
}
