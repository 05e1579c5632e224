use api::{category_labels, Product, FILTER_CATEGORIES};
use dioxus::prelude::*;
use ui::icons::FaMagnifyingGlass;
use ui::notice::push_notice;
use ui::{use_auth, use_cart, use_notices, Banner, Icon, NoticeLevel, ProductCard, Spinner};

/// Products that pass both the category chip and the search box.
fn visible(products: &[Product], category: &str, query: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.in_category(category) && p.matches_query(query))
        .cloned()
        .collect()
}

#[component]
pub fn Products() -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let mut notices = use_notices();
    let mut category = use_signal(|| "All".to_string());
    let mut query = use_signal(String::new);
    let mut busy = use_signal(|| Option::<i64>::None);

    let mut catalog = use_resource({
        let auth = auth.clone();
        move || {
            let client = auth.client();
            async move { client.products().await.map_err(|e| e.user_message("Failed to load products. Please try again.")) }
        }
    });

    let add_to_cart = {
        let auth = auth.clone();
        move |product: Product| {
            let Some(user) = auth.user() else {
                push_notice(&mut notices, NoticeLevel::Warning, "Please sign in to add items to your cart.");
                return;
            };
            let client = auth.client();
            let cart = cart.clone();
            spawn(async move {
                busy.set(Some(product.id));
                match client.add_to_cart(user.user_id, product.id, 1).await {
                    Ok(_) => {
                        let mut line = store::CartLine::new(product.id, 1, product.price);
                        line.name = Some(product.name.clone());
                        line.image = product.image_url.clone();
                        line.eco_points = product.eco_points;
                        if let Err(e) = cart.add_line(line) {
                            tracing::warn!("Failed to mirror cart line: {}", e);
                            cart.notify_changed();
                        }
                        push_notice(&mut notices, NoticeLevel::Success, &format!("{} added to cart", product.name));
                    }
                    Err(e) => {
                        push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to add item to cart."));
                    }
                }
                busy.set(None);
            });
        }
    };

    let add_to_wishlist = move |product: Product| {
        let Some(user) = auth.user() else {
            return;
        };
        let client = auth.client();
        spawn(async move {
            match client.add_to_wishlist(user.user_id, product.id).await {
                Ok(_) => push_notice(&mut notices, NoticeLevel::Success, &format!("{} saved to wishlist", product.name)),
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to update wishlist.")),
            }
        });
    };

    let body = match &*catalog.read() {
        None => rsx! { Spinner { label: "Loading products..." } },
        Some(Err(message)) => rsx! {
            div {
                class: "text-center p-12",
                Banner { level: NoticeLevel::Error, message: message.clone() }
                button {
                    class: "px-6 py-3 rounded-full bg-emerald-600 text-white font-semibold",
                    onclick: move |_| catalog.restart(),
                    "Try Again"
                }
            }
        },
        Some(Ok(products)) => {
            let labels = category_labels(products, FILTER_CATEGORIES);
            let shown = visible(products, &category.read(), &query.read());
            rsx! {
                div {
                    class: "flex flex-wrap gap-3 mb-6",
                    for label in labels {
                        button {
                            key: "{label}",
                            class: if *category.read() == label {
                                "px-5 py-2.5 rounded-full text-sm font-semibold border bg-emerald-600 text-white border-emerald-600"
                            } else {
                                "px-5 py-2.5 rounded-full text-sm font-semibold border bg-white dark:bg-gray-800 text-emerald-700 dark:text-emerald-100 border-emerald-100 dark:border-emerald-800"
                            },
                            onclick: {
                                let label = label.clone();
                                move |_| category.set(label.clone())
                            },
                            "{label}"
                        }
                    }
                }
                if shown.is_empty() {
                    div {
                        class: "text-center py-24",
                        h3 { class: "text-2xl font-bold mb-2", "No products found" }
                        p { class: "text-gray-500", "Try adjusting your search or category filters." }
                    }
                } else {
                    div {
                        class: "grid gap-6 sm:grid-cols-2 lg:grid-cols-3",
                        for product in shown {
                            ProductCard {
                                key: "{product.id}",
                                busy: busy() == Some(product.id),
                                product: product.clone(),
                                on_add_to_cart: add_to_cart.clone(),
                                on_wishlist: add_to_wishlist.clone(),
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "max-w-6xl mx-auto px-6 py-16",
            header {
                class: "mb-10",
                h1 {
                    class: "text-4xl md:text-5xl font-black leading-tight",
                    "Curated essentials for a "
                    span { class: "text-emerald-600", "greener" }
                    " routine"
                }
                p { class: "text-gray-500 mt-4 font-semibold uppercase tracking-tight", "Shop More, Save More" }
            }
            div {
                class: "relative mb-6",
                span {
                    class: "absolute left-4 top-1/2 -translate-y-1/2 text-emerald-400",
                    Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                }
                input {
                    class: "w-full pl-12 pr-4 py-4 rounded-2xl border border-emerald-50 dark:border-emerald-900 bg-white dark:bg-gray-800",
                    r#type: "text",
                    placeholder: "Search for sustainable products...",
                    value: "{query}",
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::product::normalize_products;
    use serde_json::json;

    #[test]
    fn test_visible_applies_category_and_query() {
        let products = normalize_products(json!([
            {"id": 1, "name": "Bamboo Brush", "categoryName": "Beauty"},
            {"id": 2, "name": "Jute Tote", "categoryName": "Fashion"},
            {"id": 3, "name": "Bamboo Cutlery", "categoryName": "Home & Living"},
        ]));
        let ids = |v: Vec<Product>| v.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(visible(&products, "All", "bamboo")), vec![1, 3]);
        assert_eq!(ids(visible(&products, "fashion", "")), vec![2]);
        assert!(visible(&products, "Beauty", "tote").is_empty());
    }
}
