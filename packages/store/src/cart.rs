//! # Cart snapshot and synchronizer
//!
//! [`CartSnapshot`] is the locally persisted cart (a JSON array under
//! [`keys::CART`]) plus the arithmetic the cart and checkout views need.
//!
//! [`CartSynchronizer`] owns the "cart changed" signal. Views call one of the
//! mutation methods after the backend confirms a change; the synchronizer
//! persists the new snapshot and then re-reads the *whole* persisted snapshot for
//! every listener. There is no caching and no coalescing, so a listener always
//! sees what is in storage at signal time, including writes another tab made.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::keys;
use crate::models::CartLine;
use crate::storage::{read_json, write_json, ChangeOrigin, KeyValueStore, StorageEvent, Subscription};
use crate::StoreError;

/// Orders above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 2000.0;
/// Flat shipping fee below the threshold.
pub const SHIPPING_FEE: f64 = 99.0;

/// Ordered cart lines. Duplicate products are allowed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn carbon_saved(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.carbon_saved * f64::from(l.quantity))
            .sum()
    }

    pub fn eco_points(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.eco_points) * u64::from(l.quantity))
            .sum()
    }

    pub fn shipping(&self) -> f64 {
        if self.subtotal() > FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            SHIPPING_FEE
        }
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.shipping()
    }
}

pub type CountListener = Arc<dyn Fn(u32) + Send + Sync>;

/// Persists cart mutations and broadcasts the resulting item count.
#[derive(Clone)]
pub struct CartSynchronizer<S: KeyValueStore> {
    store: S,
    listeners: Arc<Mutex<Vec<(u64, CountListener)>>>,
    next_id: Arc<AtomicU64>,
}

impl<S: KeyValueStore> CartSynchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            listeners: Arc::default(),
            next_id: Arc::default(),
        }
    }

    /// Read the persisted snapshot. Missing or malformed data reads as empty;
    /// a line that does not decode is skipped without affecting the others.
    pub fn load(&self) -> CartSnapshot {
        let items = match read_json::<Value, _>(&self.store, keys::CART) {
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(other)) => {
                tracing::warn!("Ignoring cart that is not a list: {}", other);
                return CartSnapshot::default();
            }
            Ok(None) => return CartSnapshot::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cart: {}", e);
                return CartSnapshot::default();
            }
        };
        let total = items.len();
        let lines: Vec<CartLine> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if lines.len() != total {
            tracing::debug!("Skipped {} unreadable cart lines", total - lines.len());
        }
        CartSnapshot::new(lines)
    }

    /// Current item count, always re-read from storage.
    pub fn count(&self) -> u32 {
        self.load().item_count()
    }

    /// Emit the "cart changed" signal.
    pub fn notify_changed(&self) {
        let listeners: Vec<CountListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            // Each listener re-reads; nothing is shared between them.
            listener(self.count());
        }
    }

    pub fn subscribe(&self, listener: CountListener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, listener));
        let listeners = self.listeners.clone();
        Subscription::new(move || {
            listeners.lock().unwrap_or_else(PoisonError::into_inner).retain(|(lid, _)| *lid != id);
        })
    }

    /// Persist `snapshot` and signal.
    pub fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        write_json(&self.store, keys::CART, snapshot)?;
        self.notify_changed();
        Ok(())
    }

    pub fn add_line(&self, line: CartLine) -> Result<CartSnapshot, StoreError> {
        self.update(|lines| lines.push(line))
    }

    /// Drop every line for `product_id`.
    pub fn remove_product(&self, product_id: i64) -> Result<CartSnapshot, StoreError> {
        self.update(|lines| lines.retain(|l| l.product_id != product_id))
    }

    /// Drop the line the backend knows as `cart_id`.
    pub fn remove_cart_row(&self, cart_id: i64) -> Result<CartSnapshot, StoreError> {
        self.update(|lines| lines.retain(|l| l.cart_id != Some(cart_id)))
    }

    /// Put `replacement` where `current` was, keeping its quantity. Lines are
    /// matched by `cart_id` when the backend assigned one, else by product.
    /// An unmatched `current` appends the replacement.
    pub fn swap_line(&self, current: &CartLine, replacement: CartLine) -> Result<CartSnapshot, StoreError> {
        let quantity = current.quantity;
        self.update(|lines| {
            let slot = lines.iter_mut().find(|l| match current.cart_id {
                Some(id) => l.cart_id == Some(id),
                None => l.product_id == current.product_id,
            });
            match slot {
                Some(slot) => *slot = CartLine { quantity, ..replacement },
                None => lines.push(CartLine { quantity, ..replacement }),
            }
        })
    }

    /// Set the quantity of every line for `product_id`; zero removes them.
    pub fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<CartSnapshot, StoreError> {
        self.update(|lines| {
            if quantity == 0 {
                lines.retain(|l| l.product_id != product_id);
            } else {
                lines
                    .iter_mut()
                    .filter(|l| l.product_id == product_id)
                    .for_each(|l| l.quantity = quantity);
            }
        })
    }

    /// Replace the snapshot wholesale, e.g. with the server's view of the cart.
    pub fn replace(&self, lines: Vec<CartLine>) -> Result<CartSnapshot, StoreError> {
        let snapshot = CartSnapshot::new(lines);
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&CartSnapshot::default())
    }

    fn update(&self, f: impl FnOnce(&mut Vec<CartLine>)) -> Result<CartSnapshot, StoreError> {
        let mut lines = self.load().into_lines();
        f(&mut lines);
        self.replace(lines)
    }
}

impl<S> CartSynchronizer<S>
where
    S: KeyValueStore + Clone + Send + Sync + 'static,
{
    /// Re-signal whenever another tab rewrites the cart.
    pub fn watch_external(&self) -> Subscription {
        let this = self.clone();
        self.store.subscribe(Arc::new(move |e: &StorageEvent| {
            if e.origin == ChangeOrigin::External && e.touches(keys::CART) {
                this.notify_changed();
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::atomic::AtomicU32;

    fn line(product_id: i64, quantity: u32, price: f64) -> CartLine {
        CartLine::new(product_id, quantity, price)
    }

    #[test]
    fn test_empty_snapshot_counts_zero() {
        let sync = CartSynchronizer::new(MemoryStore::new());
        assert_eq!(sync.count(), 0);
        assert_eq!(CartSnapshot::default().item_count(), 0);
    }

    #[test]
    fn test_count_sums_quantities_including_duplicates() {
        let snapshot = CartSnapshot::new(vec![line(1, 2, 10.0), line(2, 3, 5.0), line(1, 1, 10.0)]);
        assert_eq!(snapshot.item_count(), 6);
        assert_eq!(snapshot.lines().len(), 3);
    }

    #[test]
    fn test_malformed_cart_counts_zero() {
        let store = MemoryStore::new();
        store.set(keys::CART, "not-a-cart");
        let sync = CartSynchronizer::new(store);
        assert_eq!(sync.count(), 0);
    }

    #[test]
    fn test_odd_cart_lines_do_not_zero_the_count() {
        let store = MemoryStore::new();
        let sync = CartSynchronizer::new(store.clone());

        store.set(
            keys::CART,
            r#"[{"productId":1,"quantity":2},{"productId":2,"quantity":3,"price":"12.50"}]"#,
        );
        assert_eq!(sync.count(), 5);
        assert_eq!(sync.load().subtotal(), 37.5);

        store.set(keys::CART, r#"[{"productId":1,"quantity":2},{"productId":2,"quantity":1.0}]"#);
        assert_eq!(sync.count(), 3);

        store.set(keys::CART, r#"[{"productId":1,"quantity":2},null,{"quantity":9}]"#);
        assert_eq!(sync.count(), 2);

        store.set(keys::CART, r#"[{"productId":1,"quantity":"4"},{"productId":2,"quantity":-1}]"#);
        assert_eq!(sync.count(), 4);

        store.set(keys::CART, r#"{"productId":1,"quantity":2}"#);
        assert_eq!(sync.count(), 0);
    }

    #[test]
    fn test_totals_and_shipping_threshold() {
        let mut a = line(1, 2, 500.0);
        a.carbon_saved = 1.5;
        a.eco_points = 10;
        let snapshot = CartSnapshot::new(vec![a, line(2, 1, 250.0)]);

        assert_eq!(snapshot.subtotal(), 1250.0);
        assert_eq!(snapshot.carbon_saved(), 3.0);
        assert_eq!(snapshot.eco_points(), 20);
        assert_eq!(snapshot.shipping(), SHIPPING_FEE);
        assert_eq!(snapshot.total(), 1349.0);

        let big = CartSnapshot::new(vec![line(3, 1, 2000.01)]);
        assert_eq!(big.shipping(), 0.0);

        let edge = CartSnapshot::new(vec![line(3, 1, 2000.0)]);
        assert_eq!(edge.shipping(), SHIPPING_FEE);
    }

    #[test]
    fn test_signal_reflects_freshly_persisted_snapshot() {
        let store = MemoryStore::new();
        let sync = CartSynchronizer::new(store.clone());
        let last = Arc::new(AtomicU32::new(u32::MAX));
        let sink = last.clone();
        let _sub = sync.subscribe(Arc::new(move |n| sink.store(n, Ordering::SeqCst)));

        // Someone writes the snapshot directly, then signals.
        store.set(keys::CART, r#"[{"productId":1,"quantity":4},{"productId":2,"quantity":1}]"#);
        sync.notify_changed();
        assert_eq!(last.load(Ordering::SeqCst), 5);

        store.set(keys::CART, "[]");
        sync.notify_changed();
        assert_eq!(last.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_mutations_persist_then_signal() {
        let store = MemoryStore::new();
        let sync = CartSynchronizer::new(store.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = sync.subscribe(Arc::new(move |n| sink.lock().unwrap().push(n)));

        sync.add_line(line(1, 2, 10.0)).unwrap();
        sync.add_line(line(2, 1, 4.0)).unwrap();
        sync.set_quantity(1, 5).unwrap();
        sync.remove_product(2).unwrap();
        sync.clear().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![2, 3, 6, 5, 0]);
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let sync = CartSynchronizer::new(MemoryStore::new());
        sync.add_line(line(1, 2, 10.0)).unwrap();
        let snapshot = sync.set_quantity(1, 0).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_remove_cart_row_only_touches_that_row() {
        let sync = CartSynchronizer::new(MemoryStore::new());
        let mut a = line(1, 1, 10.0);
        a.cart_id = Some(100);
        let mut b = line(1, 1, 10.0);
        b.cart_id = Some(101);
        sync.replace(vec![a, b]).unwrap();

        let snapshot = sync.remove_cart_row(100).unwrap();
        assert_eq!(snapshot.lines().len(), 1);
        assert_eq!(snapshot.lines()[0].cart_id, Some(101));
    }

    #[test]
    fn test_swap_line_keeps_position_and_quantity() {
        let store = MemoryStore::new();
        let sync = CartSynchronizer::new(store.clone());
        let mut bag = line(1, 3, 10.0);
        bag.cart_id = Some(100);
        sync.replace(vec![bag.clone(), line(2, 1, 4.0)]).unwrap();

        let seen = Arc::new(AtomicU32::new(0));
        let sink = seen.clone();
        let _sub = sync.subscribe(Arc::new(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        }));

        let mut greener = line(9, 1, 8.0);
        greener.name = Some("Jute Bag".into());
        let snapshot = sync.swap_line(&bag, greener).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        let ids: Vec<i64> = snapshot.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(snapshot.lines()[0].quantity, 3);
        assert_eq!(sync.load(), snapshot);
        assert_eq!(sync.count(), 4);

        // Not in the local copy yet: the replacement is still recorded.
        let snapshot = sync.swap_line(&line(5, 2, 1.0), line(6, 1, 2.0)).unwrap();
        assert_eq!(snapshot.lines().last().map(|l| (l.product_id, l.quantity)), Some((6, 2)));
    }

    #[test]
    fn test_external_cart_write_resignals() {
        let store = MemoryStore::new();
        let sync = CartSynchronizer::new(store.clone());
        let _watch = sync.watch_external();
        let last = Arc::new(AtomicU32::new(0));
        let sink = last.clone();
        let _sub = sync.subscribe(Arc::new(move |n| sink.store(n, Ordering::SeqCst)));

        store.apply_external(keys::CART, Some(r#"[{"productId":9,"quantity":7}]"#));
        assert_eq!(last.load(Ordering::SeqCst), 7);

        // Unrelated keys do not signal.
        last.store(0, Ordering::SeqCst);
        store.apply_external(keys::THEME, Some("dark"));
        assert_eq!(last.load(Ordering::SeqCst), 0);
    }
}
