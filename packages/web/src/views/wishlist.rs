use api::{Product, WishlistItem};
use dioxus::prelude::*;
use store::CartLine;
use ui::icons::FaHeart;
use ui::notice::push_notice;
use ui::{use_auth, use_cart, use_notices, Banner, Icon, NoticeLevel, ProductCard, Spinner};

use crate::Route;

#[component]
pub fn Wishlist() -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let mut notices = use_notices();
    let mut items = use_signal(Vec::<WishlistItem>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| Option::<i64>::None);

    let _loader = use_resource({
        let auth = auth.clone();
        move || {
            let client = auth.client();
            let user = auth.user();
            async move {
                let Some(user) = user else {
                    loading.set(false);
                    return;
                };
                match client.wishlist(user.user_id).await {
                    Ok(loaded) => items.set(loaded),
                    Err(e) => {
                        tracing::error!("Wishlist load failed: {}", e);
                        error.set(Some(e.user_message("Failed to load wishlist.")));
                    }
                }
                loading.set(false);
            }
        }
    });

    let remove = {
        let auth = auth.clone();
        move |wishlist_id: i64| {
            let client = auth.client();
            spawn(async move {
                match client.remove_from_wishlist(wishlist_id).await {
                    Ok(()) => {
                        items.write().retain(|item| item.wishlist_id != Some(wishlist_id));
                        push_notice(&mut notices, NoticeLevel::Info, "Removed from wishlist");
                    }
                    Err(e) => error.set(Some(e.user_message("Failed to remove item."))),
                }
            });
        }
    };

    let add_to_cart = move |product: Product| {
        let Some(user) = auth.user() else {
            return;
        };
        let client = auth.client();
        let cart = cart.clone();
        spawn(async move {
            busy.set(Some(product.id));
            match client.add_to_cart(user.user_id, product.id, 1).await {
                Ok(_) => {
                    let mut line = CartLine::new(product.id, 1, product.price);
                    line.name = Some(product.name.clone());
                    line.image = product.image_url.clone();
                    line.eco_points = product.eco_points;
                    if let Err(e) = cart.add_line(line) {
                        tracing::warn!("Failed to mirror cart line: {}", e);
                        cart.notify_changed();
                    }
                    push_notice(&mut notices, NoticeLevel::Success, &format!("{} added to cart", product.name));
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to add item to cart.")),
            }
            busy.set(None);
        });
    };

    if loading() {
        return rsx! { Spinner { label: "Loading wishlist..." } };
    }

    let current = items();

    rsx! {
        div {
            class: "max-w-6xl mx-auto px-6 py-16",
            h1 {
                class: "flex items-center gap-3 text-3xl font-bold mb-8",
                span { class: "text-rose-500", Icon { icon: FaHeart, width: 24, height: 24 } }
                "My Wishlist"
            }
            if let Some(message) = error() {
                Banner { level: NoticeLevel::Error, message, on_dismiss: move |_| error.set(None) }
            }
            if current.is_empty() {
                div {
                    class: "text-center py-24",
                    h2 { class: "text-2xl font-bold mb-2", "Your wishlist is empty" }
                    p { class: "text-gray-500 mb-6", "Save products you love and come back to them later." }
                    Link { to: Route::Products {}, class: "px-6 py-3 rounded-full bg-emerald-600 text-white font-semibold", "Browse Products" }
                }
            } else {
                div {
                    class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                    for item in current {
                        div {
                            key: "{item.wishlist_id.unwrap_or(item.product.id)}",
                            class: "flex flex-col gap-2",
                            ProductCard {
                                busy: busy() == Some(item.product.id),
                                product: item.product.clone(),
                                on_add_to_cart: add_to_cart.clone(),
                            }
                            if let Some(wishlist_id) = item.wishlist_id {
                                button {
                                    class: "text-sm text-red-500 hover:text-red-700 font-semibold",
                                    onclick: {
                                        let remove = remove.clone();
                                        move |_| remove(wishlist_id)
                                    },
                                    "Remove from wishlist"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
