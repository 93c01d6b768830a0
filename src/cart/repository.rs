//! Cart Persistence
//!
//! The storefront keeps cart state in a key-value store shared by every view
//! of the application. The contract is an explicit repository over a
//! [`KvStore`] trait so the engine runs against an in-memory map in tests
//! and a JSON file when state must survive a reload.
//!
//! Corrupt or missing persisted state is never an error: it reads back as an
//! empty cart.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::{Map, Value};
use tracing::warn;

use super::models::CartLineItem;

/// Persisted-store key holding the serialized cart line items.
pub const CART_KEY: &str = "cart";
/// Persisted-store key holding the serialized saved-for-later items.
pub const SAVED_ITEMS_KEY: &str = "savedItems";
/// Persisted-store key holding the active discount rate as a decimal string.
pub const DISCOUNT_KEY: &str = "discount";

/// String key-value store backing the cart repository.
///
/// Writes are synchronous: when `set` returns, the value is durable as far
/// as the backend can make it. The store is shared by all open views; there
/// is no locking, so concurrent mutations are last-write-wins.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store shared by every view of a single process.
/// DashMap allows concurrent access without external Mutexes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Durable store: one JSON object per file, rewritten synchronously on every
/// `set` so a broadcast never races ahead of the data it announces.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_map(&self) -> Map<String, Value> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            _ => {
                warn!(path = %self.path.display(), "discarding unreadable store file");
                Map::new()
            }
        }
    }

    fn write_map(&self, map: Map<String, Value>) {
        let raw = Value::Object(map).to_string();
        if let Err(err) = fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), %err, "failed to persist store file");
        }
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_owned(), Value::String(value.to_owned()));
        self.write_map(map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        map.remove(key);
        self.write_map(map);
    }
}

/// Owns the three persisted-store keys (`cart`, `savedItems`, `discount`)
/// and the serialization in and out of them.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KvStore>,
}

impl CartRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh in-memory store, for tests and ephemeral
    /// sessions.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Loads the cart line items; missing or corrupt state reads as empty.
    pub fn load_cart(&self) -> Vec<CartLineItem> {
        self.load_items(CART_KEY)
    }

    pub fn save_cart(&self, items: &[CartLineItem]) {
        self.save_items(CART_KEY, items);
    }

    /// Loads the saved-for-later items; missing or corrupt state reads as
    /// empty.
    pub fn load_saved(&self) -> Vec<CartLineItem> {
        self.load_items(SAVED_ITEMS_KEY)
    }

    pub fn save_saved(&self, items: &[CartLineItem]) {
        self.save_items(SAVED_ITEMS_KEY, items);
    }

    /// Active discount rate in `[0, 1]`; 0.0 when absent or unparseable.
    pub fn load_discount(&self) -> f64 {
        self.store
            .get(DISCOUNT_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|rate| (0.0..=1.0).contains(rate))
            .unwrap_or(0.0)
    }

    /// Persists the discount rate; a new coupon overwrites the old rate.
    pub fn save_discount(&self, rate: f64) {
        self.store.set(DISCOUNT_KEY, &rate.to_string());
    }

    /// Consumes the discount. Called exactly once, when a checkout request
    /// has been dispatched successfully.
    pub fn clear_discount(&self) {
        self.store.remove(DISCOUNT_KEY);
    }

    fn load_items(&self, key: &str) -> Vec<CartLineItem> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(key, %err, "treating corrupt persisted state as empty");
                Vec::new()
            }
        }
    }

    fn save_items(&self, key: &str, items: &[CartLineItem]) {
        match serde_json::to_string(items) {
            Ok(raw) => self.store.set(key, &raw),
            Err(err) => warn!(key, %err, "failed to serialize cart state"),
        }
    }
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository").finish_non_exhaustive()
    }
}
