//! # API crate - typed REST client for the EcoBazaarX backend
//!
//! Every backend call the views make goes through [`ApiClient`]. The backend is
//! an external Spring service; this crate only knows its HTTP contracts and
//! turns its loosely typed payloads into strict types at the boundary.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `ecobazaar.toml`: backend base URL, polling interval |
//! | [`models`] | Raw wire types and the normalised types views render |
//! | [`lenient`] | Serde helpers for numbers-as-strings, `null`s and paged lists |
//! | `client` | Request building, bearer auth, status and message extraction |
//! | `endpoints` | One `impl ApiClient` block per resource |
//!
//! ## Calls exposed on [`ApiClient`]
//!
//! - **Auth**: `login`, `register`
//! - **Catalog**: `products`, `product`
//! - **Cart**: `cart` (details with listing fallback), `cart_listing`, `add_to_cart`,
//!   `remove_cart_row`, `clear_cart`
//! - **Orders**: `create_order`, `customer_orders`, `mark_delivered`
//! - **Wishlist**: `wishlist`, `add_to_wishlist`, `remove_from_wishlist`
//! - **Profile**: `customer_profile`
//! - **Admin**: `pending_admins`, `pending_products`, `all_products`, `approve_admin`,
//!   `approve_product`, `reject`, `remove_product`
//! - **Seller**: `seller_products`, `create_product`, `update_product`, `delete_product`,
//!   `seller_stats` (derived from products when the endpoint fails)
//! - **Suggestions**: `greener_alternative`
//!
//! Nothing is retried. Failures surface as [`ApiError`] and views show
//! [`ApiError::user_message`] in an inline banner.

mod client;
pub mod config;
mod endpoints;
mod error;
pub mod lenient;
pub mod models;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::*;
