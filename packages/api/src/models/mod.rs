//! Wire types and their normalisation into the strict types views render.

pub mod admin;
pub mod cart;
pub mod order;
pub mod product;
pub mod profile;
pub mod seller;
pub mod suggestion;
pub mod user;
pub mod wishlist;

pub use admin::{PendingAdmin, RejectTarget};
pub use cart::CartItem;
pub use order::{
    Order, OrderConfirmation, OrderItem, OrderRequest, OrderStatus, PaymentMethod, ShippingInfo,
    TreePlanting, UPI_UNAVAILABLE,
};
pub use product::{category_labels, Product, FILTER_CATEGORIES};
pub use profile::CustomerProfile;
pub use seller::{ProductPayload, SellerStats, SELLER_CATEGORIES};
pub use suggestion::GreenerAlternative;
pub use user::{AccountType, LoginRequest, LoginResponse, RegisterRequest};
pub use wishlist::WishlistItem;
