use api::Product;
use dioxus::prelude::*;

use crate::icons::{FaCartPlus, FaHeart, FaLeaf, FaStar};
use crate::Icon;

/// Carbon score badge colour: green at or under the eco-friendly ceiling.
pub fn carbon_badge_class(score: f64) -> &'static str {
    if score <= api::models::product::ECO_FRIENDLY_MAX_SCORE {
        "bg-emerald-100 text-emerald-700 dark:bg-emerald-900/40 dark:text-emerald-300"
    } else if score <= 6.0 {
        "bg-amber-100 text-amber-700 dark:bg-amber-900/40 dark:text-amber-300"
    } else {
        "bg-red-100 text-red-700 dark:bg-red-900/40 dark:text-red-300"
    }
}

pub fn format_price(amount: f64) -> String {
    format!("₹{amount:.2}")
}

#[component]
pub fn ProductCard(
    product: Product,
    on_add_to_cart: EventHandler<Product>,
    #[props(default)] on_wishlist: Option<EventHandler<Product>>,
    #[props(default)] busy: bool,
) -> Element {
    let href = format!("/product/{}", product.id);
    let in_stock = product.in_stock();
    let discount = product.discount_percent();
    let for_cart = product.clone();
    let for_wishlist = product.clone();

    rsx! {
        div {
            class: "flex flex-col rounded-2xl overflow-hidden bg-white dark:bg-gray-800 shadow hover:shadow-lg transition-shadow",
            Link {
                to: href,
                class: "relative block h-48 bg-emerald-50 dark:bg-gray-700",
                if let Some(src) = product.image_url.as_ref() {
                    img { class: "w-full h-full object-cover", src: "{src}", alt: "{product.name}" }
                } else {
                    div {
                        class: "w-full h-full flex items-center justify-center text-emerald-300",
                        Icon { icon: FaLeaf, width: 48, height: 48 }
                    }
                }
                if product.is_eco_friendly {
                    span {
                        class: "absolute top-3 left-3 px-2 py-1 rounded-full text-xs font-semibold bg-emerald-600 text-white",
                        "Eco-friendly"
                    }
                }
                if let Some(pct) = discount {
                    span {
                        class: "absolute top-3 right-3 px-2 py-1 rounded-full text-xs font-semibold bg-red-500 text-white",
                        "-{pct}%"
                    }
                }
            }
            div {
                class: "flex-1 flex flex-col gap-2 p-4",
                span { class: "text-xs uppercase tracking-wide text-emerald-600", "{product.category_name}" }
                Link {
                    to: format!("/product/{}", product.id),
                    class: "font-semibold text-gray-900 dark:text-gray-100 line-clamp-2",
                    "{product.name}"
                }
                div {
                    class: "flex items-center gap-1 text-sm text-amber-500",
                    Icon { icon: FaStar, width: 12, height: 12 }
                    "{product.rating:.1}"
                    span { class: "text-gray-400", "({product.reviews})" }
                }
                if let Some(score) = product.carbon_score {
                    span {
                        class: "self-start px-2 py-0.5 rounded text-xs font-medium {carbon_badge_class(score)}",
                        "{score:.1} kg CO₂"
                    }
                }
                div {
                    class: "flex items-baseline gap-2 mt-auto",
                    span { class: "text-lg font-bold text-gray-900 dark:text-white", "{format_price(product.price)}" }
                    if discount.is_some() {
                        span { class: "text-sm line-through text-gray-400", "{format_price(product.original_price)}" }
                    }
                }
                div {
                    class: "flex gap-2",
                    button {
                        class: "flex-1 flex items-center justify-center gap-2 py-2 rounded-lg bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white text-sm font-semibold",
                        disabled: !in_stock || busy,
                        onclick: move |_| on_add_to_cart.call(for_cart.clone()),
                        Icon { icon: FaCartPlus, width: 14, height: 14 }
                        if in_stock { "Add to cart" } else { "Out of stock" }
                    }
                    if let Some(handler) = on_wishlist {
                        button {
                            class: "px-3 rounded-lg border border-emerald-200 dark:border-emerald-800 text-red-500 hover:bg-red-50 dark:hover:bg-red-900/20",
                            title: "Add to wishlist",
                            onclick: move |_| handler.call(for_wishlist.clone()),
                            Icon { icon: FaHeart, width: 14, height: 14 }
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

    #[test]
    fn test_badge_thresholds() {
        assert!(carbon_badge_class(3.0).contains("emerald"));
        assert!(carbon_badge_class(4.5).contains("amber"));
        assert!(carbon_badge_class(9.0).contains("red"));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(49.5), "₹49.50");
    }
}
