//! Platform storage handles.
//!
//! - **Web** (WASM + `web` feature): `localStorage` / `sessionStorage` via [`store::WebStorage`]
//! - **Everywhere else**: process-wide [`store::MemoryStore`]s, so every handle
//!   returned by one of these functions sees the same data

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStore = store::WebStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type AppStore = store::MemoryStore;

/// Store that survives reloads: token, user, cart, theme.
pub fn make_local_store() -> AppStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::WebStorage::local()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static LOCAL: std::sync::OnceLock<store::MemoryStore> = std::sync::OnceLock::new();
        LOCAL.get_or_init(store::MemoryStore::new).clone()
    }
}

/// Store scoped to the current tab: the first-visit marker.
pub fn make_session_store() -> AppStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::WebStorage::session()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static SESSION: std::sync::OnceLock<store::MemoryStore> = std::sync::OnceLock::new();
        SESSION.get_or_init(store::MemoryStore::new).clone()
    }
}
