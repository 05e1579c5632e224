use dioxus::prelude::*;

use crate::icons::FaLeaf;
use crate::Icon;

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: "mt-16 border-t border-emerald-100 dark:border-emerald-900 bg-emerald-50 dark:bg-gray-900",
            div {
                class: "max-w-7xl mx-auto px-4 py-10 grid gap-8 md:grid-cols-3 text-sm text-gray-600 dark:text-gray-400",
                div {
                    div {
                        class: "flex items-center gap-2 mb-3 text-lg font-bold text-emerald-700 dark:text-emerald-400",
                        Icon { icon: FaLeaf, width: 16, height: 16 }
                        "EcoBazaarX"
                    }
                    p { "Shop sustainably. Every order tracks the carbon it saves." }
                }
                div {
                    h4 { class: "font-semibold text-gray-800 dark:text-gray-200 mb-3", "Explore" }
                    ul {
                        class: "space-y-2",
                        li { Link { to: "/products", "Marketplace" } }
                        li { Link { to: "/wishlist", "Wishlist" } }
                        li { Link { to: "/orders", "Orders" } }
                        li { Link { to: "/about", "About us" } }
                    }
                }
                div {
                    h4 { class: "font-semibold text-gray-800 dark:text-gray-200 mb-3", "Sell with us" }
                    p { "Register a seller account to list eco-friendly products." }
                    Link {
                        to: "/auth",
                        class: "inline-block mt-3 text-emerald-700 dark:text-emerald-400 font-semibold",
                        "Get started"
                    }
                }
            }
            p {
                class: "text-center text-xs text-gray-500 pb-6",
                "© EcoBazaarX"
            }
        }
    }
}
