use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::cart::CartBadge;
use crate::icons::FaLeaf;
use crate::theme::ThemeToggle;
use crate::Icon;

const LINK: &str = "text-gray-700 dark:text-gray-200 hover:text-emerald-600 dark:hover:text-emerald-400 font-medium";

/// Top navigation bar shown on every view except the dashboards and `/auth`.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let user = auth.user();

    rsx! {
        nav {
            class: "sticky top-0 z-40 bg-white/90 dark:bg-gray-900/90 backdrop-blur border-b border-emerald-100 dark:border-emerald-900",
            div {
                class: "max-w-7xl mx-auto px-4 h-16 flex items-center justify-between gap-6",
                Link {
                    to: "/",
                    class: "flex items-center gap-2 text-xl font-bold text-emerald-700 dark:text-emerald-400",
                    Icon { icon: FaLeaf, width: 20, height: 20 }
                    "EcoBazaarX"
                }
                div {
                    class: "flex items-center gap-6",
                    Link { to: "/", class: LINK, "Home" }
                    if user.is_some() {
                        Link { to: "/products", class: LINK, "Marketplace" }
                    }
                    Link { to: "/about", class: LINK, "About" }
                }
                div {
                    class: "flex items-center gap-5",
                    ThemeToggle {}
                    if let Some(user) = user {
                        Link { to: "/orders", class: LINK, "Orders" }
                        Link {
                            to: "/cart",
                            class: LINK,
                            CartBadge {}
                        }
                        button {
                            class: "w-9 h-9 rounded-full bg-emerald-600 text-white font-bold flex items-center justify-center",
                            title: "{user.display_name()}",
                            onclick: move |_| {
                                nav.push("/profile");
                            },
                            "{initial(&user.username)}"
                        }
                    } else {
                        button {
                            class: "px-4 py-2 rounded-lg bg-emerald-600 hover:bg-emerald-700 text-white font-semibold",
                            onclick: move |_| {
                                nav.push("/auth");
                            },
                            "Sign In"
                        }
                    }
                }
            }
        }
    }
}

fn initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        assert_eq!(initial("mira"), "M");
        assert_eq!(initial(""), "?");
    }
}
