//! One module per backend resource, each an `impl ApiClient` block.

mod admin;
mod auth;
mod cart;
mod catalog;
mod orders;
mod profile;
mod seller;
mod suggestions;
mod wishlist;
