//! This crate contains all shared UI for the workspace: session and cart
//! contexts, the route access gate, form validation and the common widgets.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod storage;
pub use storage::{make_local_store, make_session_store, AppStore};

pub mod access;
pub mod forms;

mod auth;
pub use auth::{use_auth, AuthContext, AuthProvider, LogoutButton};

mod cart;
pub use cart::{use_cart, CartBadge, CartContext, CartProvider};

mod theme;
pub use theme::{apply_theme, ThemeToggle};

pub mod notice;
pub use notice::{push_notice, use_notices, Banner, NoticeLevel, NoticeProvider};

mod navbar;
pub use navbar::Navbar;

mod footer;
pub use footer::Footer;

mod product_card;
pub use product_card::{carbon_badge_class, format_price, ProductCard};

mod greener;
pub use greener::GreenerAlternativeCard;

mod timer;
pub use timer::sleep;

mod field;
pub use field::{Spinner, TextArea, TextField};
