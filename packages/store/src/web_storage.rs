//! # Web Storage adapter - browser-side persistence
//!
//! [`WebStorage`] is the [`KeyValueStore`] used on the **web platform**. It wraps
//! either `window.localStorage` (session credentials, cart, theme) or
//! `window.sessionStorage` (the per-tab first-load marker).
//!
//! ## Change notification
//!
//! Writes made through the adapter are delivered to listeners directly, since the
//! browser never fires `storage` events in the tab that made the change. Writes
//! from other tabs arrive through a `storage` event listener registered on
//! `window` for each subscription, filtered to the adapter's storage area.
//!
//! ## Error handling
//!
//! Like the rest of the persistence layer, failures (storage disabled, quota
//! exceeded, private browsing restrictions) are logged and swallowed. A missing
//! storage area reads as empty.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::StoreError;
use crate::storage::{ChangeOrigin, KeyValueStore, Listener, StorageEvent, Subscription};

/// Which browser storage area to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

/// `localStorage`/`sessionStorage`-backed KeyValueStore.
#[derive(Clone)]
pub struct WebStorage {
    area: StorageArea,
    listeners: Arc<Mutex<Vec<(u64, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl WebStorage {
    pub fn local() -> Self {
        Self::new(StorageArea::Local)
    }

    pub fn session() -> Self {
        Self::new(StorageArea::Session)
    }

    fn new(area: StorageArea) -> Self {
        Self {
            area,
            listeners: Arc::default(),
            next_id: Arc::default(),
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        storage
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable(format!("{:?} storage disabled", self.area)))
    }

    fn notify(&self, event: &StorageEvent) {
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

    fn watch_external(&self, listener: Listener) -> Option<ExternalWatch> {
        let window = web_sys::window()?;
        let own_area: JsValue = self.storage().ok()?.into();
        let closure = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |e: web_sys::StorageEvent| {
                let same_area = e
                    .storage_area()
                    .map(|area| JsValue::from(area) == own_area)
                    .unwrap_or(false);
                if !same_area {
                    return;
                }
                listener(&StorageEvent {
                    key: e.key(),
                    origin: ChangeOrigin::External,
                });
            },
        );
        if let Err(e) =
            window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to watch storage events: {:?}", e);
            return None;
        }
        Some(ExternalWatch { window, closure })
    }
}

struct ExternalWatch {
    window: web_sys::Window,
    closure: Closure<dyn FnMut(web_sys::StorageEvent)>,
}

impl Drop for ExternalWatch {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("storage", self.closure.as_ref().unchecked_ref());
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(e) => {
                tracing::debug!("Read of `{}` skipped: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("Failed to persist `{}`: {:?}", key, e);
            return;
        }
        self.notify(&StorageEvent::local(key));
    }

    fn remove(&self, key: &str) {
        let Ok(storage) = self.storage() else {
            return;
        };
        if storage.remove_item(key).is_ok() {
            self.notify(&StorageEvent::local(key));
        }
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, listener.clone()));
        let external = self.watch_external(listener);
        let listeners = self.listeners.clone();
        Subscription::new(move || {
            listeners.lock().unwrap_or_else(PoisonError::into_inner).retain(|(lid, _)| *lid != id);
            drop(external);
        })
    }
}
