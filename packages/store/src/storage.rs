//! # Key-value storage adapter
//!
//! Everything the client persists between page loads goes through the
//! [`KeyValueStore`] trait: the auth token, the serialized user record, the
//! cart snapshot and the theme preference. Implementations live in sibling
//! modules ([`crate::memory`] for tests and native builds, [`crate::web_storage`]
//! for the browser).
//!
//! ## Change notification
//!
//! Stores expose [`subscribe`](KeyValueStore::subscribe). Listeners receive a
//! [`StorageEvent`] for every write performed through the adapter
//! ([`ChangeOrigin::Local`]) and, where the backend supports it, for writes made
//! by another tab ([`ChangeOrigin::External`]). The returned [`Subscription`]
//! unsubscribes when dropped.
//!
//! ## JSON helpers
//!
//! [`read_json`] / [`write_json`] wrap the raw string API with `serde_json`.
//! A value that fails to parse is reported as [`StoreError::Corrupt`] so callers
//! can decide whether to wipe it.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Where a storage change came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Written through this adapter instance.
    Local,
    /// Written by another browsing context sharing the same storage.
    External,
}

/// A single change to the store. `key` is `None` when the whole store was cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
    pub origin: ChangeOrigin,
}

impl StorageEvent {
    pub fn local(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            origin: ChangeOrigin::Local,
        }
    }

    /// Whether this event may have changed `key`.
    pub fn touches(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

pub type Listener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

/// Handle returned by `subscribe`. Dropping it removes the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that never fires and has nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// String key-value persistence with change notification.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Read and deserialize a JSON value. `Ok(None)` when the key is absent.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Serialize a value as JSON and write it under `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw);
    Ok(())
}
