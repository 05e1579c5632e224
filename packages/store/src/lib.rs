//! Client-side persistence and the session/cart state built on top of it.

pub mod cart;
pub mod error;
pub mod keys;
pub mod models;
pub mod preferences;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_storage::{StorageArea, WebStorage};

pub use cart::{CartSnapshot, CartSynchronizer};
pub use error::StoreError;
pub use models::{CartLine, Role, StoredUser, Theme};
pub use preferences::{load_theme, save_theme};
pub use session::{post_login_destination, AuthState, Session, SessionResolver};
pub use storage::{ChangeOrigin, KeyValueStore, StorageEvent, Subscription};
