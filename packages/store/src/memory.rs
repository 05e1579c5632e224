use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::storage::{ChangeOrigin, KeyValueStore, Listener, StorageEvent, Subscription};

/// In-memory KeyValueStore for testing and native fallback.
///
/// Clones share the same map and listener list, the same way two handles to
/// `localStorage` in one tab see each other's writes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    listeners: Arc<Mutex<Vec<(u64, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("values", &self.values.lock().unwrap_or_else(PoisonError::into_inner))
            .field("listeners", &self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len())
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a write as if another tab had made it.
    ///
    /// `None` removes the key. Listeners see [`ChangeOrigin::External`].
    pub fn apply_external(&self, key: &str, value: Option<&str>) {
        {
            let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
            match value {
                Some(v) => values.insert(key.to_string(), v.to_string()),
                None => values.remove(key),
            };
        }
        self.notify(&StorageEvent {
            key: Some(key.to_string()),
            origin: ChangeOrigin::External,
        });
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self, event: &StorageEvent) {
        // Snapshot so listeners may (un)subscribe re-entrantly.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.notify(&StorageEvent::local(key));
    }

    fn remove(&self, key: &str) {
        let existed = self.values.lock().unwrap_or_else(PoisonError::into_inner).remove(key).is_some();
        if existed {
            self.notify(&StorageEvent::local(key));
        }
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, listener));
        let listeners = self.listeners.clone();
        Subscription::new(move || {
            listeners.lock().unwrap_or_else(PoisonError::into_inner).retain(|(lid, _)| *lid != id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("token").is_none());

        store.set("token", "abc");
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        store.remove("token");
        assert!(store.get("token").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("theme", "dark");
        assert_eq!(b.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_listeners_see_local_and_external_writes() {
        let store = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(Arc::new(move |e: &StorageEvent| {
            sink.lock().unwrap().push(e.clone());
        }));

        store.set("cart", "[]");
        store.apply_external("token", Some("t"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], StorageEvent::local("cart"));
        assert_eq!(seen[1].origin, ChangeOrigin::External);
        assert_eq!(seen[1].key.as_deref(), Some("token"));
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let store = MemoryStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let sub = store.subscribe(Arc::new(move |_: &StorageEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.set("a", "1");
        drop(sub);
        store.set("a", "2");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_removing_missing_key_is_silent() {
        let store = MemoryStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = store.subscribe(Arc::new(move |_: &StorageEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.remove("nothing-here");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
