//! Well-known storage keys.

/// Opaque bearer credential.
pub const TOKEN: &str = "token";
/// JSON-serialized [`crate::StoredUser`].
pub const USER: &str = "user";
/// JSON-serialized array of [`crate::CartLine`].
pub const CART: &str = "cart";
/// `"light"` or `"dark"`.
pub const THEME: &str = "theme";
/// First-load marker, kept in per-tab session storage.
pub const VISITED: &str = "hasVisited";
