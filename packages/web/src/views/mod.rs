mod home;
pub use home::Home;

mod about;
pub use about::About;

mod auth;
pub use auth::Auth;

mod products;
pub use products::Products;

mod product_detail;
pub use product_detail::ProductDetail;

mod cart;
pub use cart::Cart;

mod checkout;
pub use checkout::Checkout;

mod orders;
pub use orders::Orders;

mod wishlist;
pub use wishlist::Wishlist;

mod profile;
pub use profile::Profile;

mod admin_dashboard;
pub use admin_dashboard::AdminDashboard;

mod seller_dashboard;
pub use seller_dashboard::SellerDashboard;
