use api::ClientConfig;
use dioxus::prelude::*;

use ui::access::{decide, is_chromeless, Access};
use ui::{use_auth, AuthProvider, CartProvider, Footer, Navbar, NoticeProvider};
use views::{
    About, AdminDashboard, Auth, Cart, Checkout, Home, Orders, ProductDetail, Products, Profile,
    SellerDashboard, Wishlist,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/auth?:redirect&:mode")]
        Auth { redirect: String, mode: String },
        #[route("/cart")]
        Cart {},
        #[route("/products")]
        Products {},
        #[route("/product/:id")]
        ProductDetail { id: i64 },
        #[route("/checkout")]
        Checkout {},
        #[route("/orders")]
        Orders {},
        #[route("/wishlist")]
        Wishlist {},
        #[route("/profile")]
        Profile {},
        #[route("/admin")]
        AdminHome {},
        #[route("/admin/dashboard")]
        AdminDashboard {},
        #[route("/seller")]
        SellerHome {},
        #[route("/seller/dashboard")]
        SellerDashboard {},
        #[route("/customer")]
        CustomerHome {},
        #[route("/customer/dashboard")]
        CustomerDashboard {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Script { "tailwind.config = {{ darkMode: 'class' }}" }
        document::Script { src: "https://cdn.tailwindcss.com" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "EcoBazaarX" }

        AuthProvider {
            config: ClientConfig::from_build_env(),
            CartProvider {
                NoticeProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Gates every navigation, then wraps the view in the navbar and footer
/// unless it renders full-screen.
#[component]
fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let path = use_route::<Route>().to_string();
    let state = auth.state();

    match decide(&path, Some(&state)) {
        Access::Render => {}
        Access::Pending => return rsx! {},
        Access::SignIn { return_to } => {
            tracing::debug!("Access to {} requires sign-in", path);
            nav.replace(Route::Auth {
                redirect: return_to.unwrap_or_default(),
                mode: String::new(),
            });
            return rsx! {};
        }
        Access::Redirect(target) => {
            nav.replace(target);
            return rsx! {};
        }
    }

    if is_chromeless(&path) {
        return rsx! {
            Outlet::<Route> {}
        };
    }

    rsx! {
        div {
            class: "min-h-screen flex flex-col bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100",
            Navbar {}
            main {
                class: "flex-1",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

// Section roots. The layout redirects these before they render.

#[component]
fn AdminHome() -> Element {
    rsx! {}
}

#[component]
fn SellerHome() -> Element {
    rsx! {}
}

#[component]
fn CustomerHome() -> Element {
    rsx! {}
}

#[component]
fn CustomerDashboard() -> Element {
    rsx! {}
}

/// Unknown paths go home.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Home {});
    rsx! {}
}
