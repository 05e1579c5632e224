use api::CartItem;
use dioxus::prelude::*;
use store::CartSnapshot;
use ui::icons::{FaArrowRight, FaLeaf, FaTrash};
use ui::notice::push_notice;
use ui::{format_price, use_auth, use_cart, use_notices, Banner, Icon, NoticeLevel, Spinner};

use crate::Route;

fn summarize(items: &[CartItem]) -> CartSnapshot {
    CartSnapshot::new(items.iter().map(CartItem::to_line).collect())
}

#[component]
pub fn Cart() -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let mut notices = use_notices();
    let mut items = use_signal(Vec::<CartItem>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    let _loader = use_resource({
        let auth = auth.clone();
        let cart = cart.clone();
        move || {
            let client = auth.client();
            let user = auth.user();
            let cart = cart.clone();
            async move {
                let Some(user) = user else {
                    loading.set(false);
                    return;
                };
                loading.set(true);
                error.set(None);
                match client.cart(user.user_id).await {
                    Ok(loaded) => {
                        // The server cart is authoritative; keep the local snapshot in step.
                        if let Err(e) = cart.replace(loaded.iter().map(CartItem::to_line).collect()) {
                            tracing::warn!("Failed to persist cart snapshot: {}", e);
                        }
                        items.set(loaded);
                    }
                    Err(e) => {
                        tracing::error!("Cart load failed: {}", e);
                        error.set(Some("Unable to load your cart. Please try again.".to_string()));
                    }
                }
                loading.set(false);
            }
        }
    });

    let remove = move |cart_id: i64| {
        let client = auth.client();
        let cart = cart.clone();
        spawn(async move {
            match client.remove_cart_row(cart_id).await {
                Ok(message) => {
                    items.write().retain(|item| item.cart_id != Some(cart_id));
                    if let Err(e) = cart.remove_cart_row(cart_id) {
                        tracing::warn!("Failed to update cart snapshot: {}", e);
                        cart.notify_changed();
                    }
                    if !message.trim().is_empty() {
                        push_notice(&mut notices, NoticeLevel::Success, &message);
                    }
                }
                Err(e) => {
                    tracing::error!("Remove from cart failed: {}", e);
                    error.set(Some("Failed to remove item. Please try again.".to_string()));
                }
            }
        });
    };

    if loading() {
        return rsx! { Spinner { label: "Loading Smart Cart..." } };
    }

    let current = items();
    if current.is_empty() && error().is_none() {
        return rsx! {
            div {
                class: "min-h-[60vh] flex flex-col items-center justify-center px-4 text-center",
                h2 { class: "text-3xl font-bold mb-4", "Your Smart Cart is Empty" }
                p {
                    class: "text-gray-500 mb-6 max-w-md",
                    "Looks like you have not added anything yet. Explore our marketplace to find sustainable picks for your home."
                }
                Link {
                    to: Route::Products {},
                    class: "px-6 py-3 bg-emerald-600 text-white rounded-full font-semibold hover:bg-emerald-700",
                    "Browse Products"
                }
            }
        };
    }

    let summary = summarize(&current);

    rsx! {
        div {
            class: "max-w-7xl mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold mb-8", "Smart Cart" }
            if let Some(message) = error() {
                Banner { level: NoticeLevel::Error, message, on_dismiss: move |_| error.set(None) }
            }
            div {
                class: "flex flex-col lg:flex-row gap-8",
                div {
                    class: "lg:w-2/3 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800 divide-y divide-gray-100 dark:divide-gray-700",
                    for item in current {
                        div {
                            key: "{item.cart_id.unwrap_or(item.product_id)}",
                            class: "p-6 flex flex-col sm:flex-row items-center gap-6",
                            div {
                                class: "w-24 h-24 flex-shrink-0 rounded-lg overflow-hidden bg-gray-100 dark:bg-gray-700",
                                if let Some(src) = item.image.as_ref() {
                                    img { class: "w-full h-full object-cover", src: "{src}", alt: "{item.name}" }
                                }
                            }
                            div {
                                class: "flex-1",
                                h3 { class: "text-lg font-semibold", "{item.name}" }
                                p { class: "text-gray-500 text-sm mb-1", "Quantity: {item.quantity}" }
                                p {
                                    class: "flex items-center gap-2 text-xs text-emerald-600",
                                    Icon { icon: FaLeaf, width: 12, height: 12 }
                                    "Saves {item.carbon_saved:.2} kg CO₂ · +{item.eco_points} pts"
                                }
                            }
                            div {
                                class: "text-right",
                                p { class: "text-xl font-bold", "{format_price(item.line_total())}" }
                                if let Some(cart_id) = item.cart_id {
                                    button {
                                        class: "mt-2 inline-flex items-center gap-1 text-sm text-red-500 hover:text-red-700",
                                        onclick: {
                                            let remove = remove.clone();
                                            move |_| remove(cart_id)
                                        },
                                        Icon { icon: FaTrash, width: 12, height: 12 }
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "lg:w-1/3",
                    div {
                        class: "sticky top-24 p-6 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                        h2 { class: "text-xl font-bold mb-6", "Order Summary" }
                        div {
                            class: "space-y-3 mb-6 pb-6 border-b border-gray-100 dark:border-gray-700 text-sm",
                            div {
                                class: "flex justify-between",
                                span { "Subtotal" }
                                span { "{format_price(summary.subtotal())}" }
                            }
                            div {
                                class: "flex justify-between text-emerald-600 font-medium",
                                span { "Carbon Saved" }
                                span { "{summary.carbon_saved():.2} kg" }
                            }
                            div {
                                class: "flex justify-between text-blue-600 font-medium",
                                span { "Eco Points Earned" }
                                span { "+{summary.eco_points()}" }
                            }
                            div {
                                class: "flex justify-between",
                                span { "Shipping" }
                                if summary.shipping() == 0.0 {
                                    span { class: "text-emerald-600", "Free" }
                                } else {
                                    span { "{format_price(summary.shipping())}" }
                                }
                            }
                        }
                        div {
                            class: "flex justify-between text-lg font-bold mb-6",
                            span { "Total" }
                            span { "{format_price(summary.total())}" }
                        }
                        Link {
                            to: Route::Checkout {},
                            class: "w-full flex items-center justify-center gap-2 py-3 rounded-lg bg-emerald-600 hover:bg-emerald-700 text-white font-semibold",
                            "Proceed to Checkout"
                            Icon { icon: FaArrowRight, width: 14, height: 14 }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::cart::normalize_cart;
    use serde_json::json;

    #[test]
    fn test_summary_over_server_rows() {
        let items = normalize_cart(json!([
            {"cartId": 1, "productId": 10, "price": 500, "quantity": 2, "carbonSaved": 1.5, "ecoPoints": 10},
            {"cartId": 2, "productId": 11, "price": "250", "quantity": 1, "ecoPoints": 4},
        ]));
        let summary = summarize(&items);
        assert_eq!(summary.item_count(), 3);
        assert_eq!(summary.subtotal(), 1250.0);
        assert_eq!(summary.carbon_saved(), 3.0);
        assert_eq!(summary.eco_points(), 24);
        assert_eq!(summary.shipping(), 99.0);
        assert_eq!(summary.total(), 1349.0);
    }
}
