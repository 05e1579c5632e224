use dioxus::prelude::*;
use ui::icons::{FaArrowRight, FaAward, FaShieldHalved, FaUsers};
use ui::Icon;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        section {
            class: "max-w-7xl mx-auto px-6 py-20 grid lg:grid-cols-2 gap-12 items-center",
            div {
                h1 {
                    class: "text-5xl lg:text-6xl font-black leading-tight mb-6",
                    "Shop with "
                    br {}
                    span { class: "text-emerald-600", "Pure Purpose." }
                }
                p {
                    class: "text-xl text-gray-600 dark:text-emerald-100/80 mb-8 max-w-lg",
                    "Discover verified sustainable products that reward the planet and your wallet. Earn Eco-Points for every carbon-neutral choice."
                }
                div {
                    class: "flex flex-wrap gap-4",
                    button {
                        class: "flex items-center gap-2 px-8 py-3 rounded-full bg-emerald-600 hover:bg-emerald-700 text-white text-lg font-bold",
                        onclick: move |_| {
                            nav.push(Route::Products {});
                        },
                        "Explore Marketplace"
                        Icon { icon: FaArrowRight, width: 18, height: 18 }
                    }
                    button {
                        class: "px-8 py-3 rounded-full font-bold border-2 border-gray-200 dark:border-emerald-800 hover:border-emerald-500",
                        onclick: move |_| {
                            nav.push(Route::About {});
                        },
                        "Our Mission"
                    }
                }
            }
            div {
                class: "flex items-center gap-4 p-6 rounded-3xl bg-emerald-50 dark:bg-emerald-900/30 shadow-xl",
                div {
                    class: "w-12 h-12 rounded-2xl bg-emerald-600 text-white flex items-center justify-center",
                    Icon { icon: FaAward, width: 20, height: 20 }
                }
                div {
                    p { class: "text-sm text-gray-500 dark:text-emerald-200/80 font-medium", "Carbon Neutral" }
                    p { class: "text-xl font-bold", "100% Verified" }
                }
            }
        }

        section {
            class: "max-w-7xl mx-auto px-6 py-16",
            div {
                class: "rounded-[3rem] bg-gray-900 p-12 lg:p-20 grid lg:grid-cols-2 gap-12 items-center",
                div {
                    h2 { class: "text-4xl font-bold text-white mb-6", "Grow Your Green Brand" }
                    p {
                        class: "text-emerald-100/70 text-lg mb-8",
                        "Join the largest community of sustainable creators and sellers. Reach conscious customers globally."
                    }
                    button {
                        class: "px-8 py-4 rounded-full bg-emerald-500 hover:bg-emerald-400 text-gray-900 font-bold text-lg",
                        onclick: move |_| {
                            nav.push(Route::Auth {
                                redirect: String::new(),
                                mode: "seller".to_string(),
                            });
                        },
                        "Become a Seller"
                    }
                }
                div {
                    class: "grid grid-cols-2 gap-4",
                    Stat { label: "Active Buyers", value: "10k+", seller_icon: false }
                    Stat { label: "Sellers Only", value: "Verified", seller_icon: true }
                }
            }
        }
    }
}

#[component]
fn Stat(label: &'static str, value: &'static str, seller_icon: bool) -> Element {
    rsx! {
        div {
            class: "p-6 rounded-3xl bg-white/5 border border-white/10 text-emerald-400",
            if seller_icon {
                Icon { icon: FaShieldHalved, width: 20, height: 20 }
            } else {
                Icon { icon: FaUsers, width: 20, height: 20 }
            }
            h4 { class: "text-white font-bold text-xl mt-4", "{value}" }
            p { class: "text-white/50 text-sm", "{label}" }
        }
    }
}
