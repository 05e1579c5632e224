use dioxus::prelude::*;
use store::CartLine;
use ui::icons::{FaCartPlus, FaLeaf, FaStar, FaTruck};
use ui::notice::push_notice;
use ui::{carbon_badge_class, format_price, use_auth, use_cart, use_notices, Banner, Icon, NoticeLevel, Spinner};

use crate::Route;

#[component]
pub fn ProductDetail(id: i64) -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let nav = use_navigator();
    let mut notices = use_notices();
    let mut quantity = use_signal(|| 1u32);
    let mut adding = use_signal(|| false);

    let product = use_resource({
        let auth = auth.clone();
        use_reactive!(|(id,)| {
            let client = auth.client();
            async move { client.product(id).await.map_err(|e| e.user_message("Product not found.")) }
        })
    });

    let product = match &*product.read() {
        None => return rsx! { Spinner { label: "Loading product..." } },
        Some(Err(message)) => {
            return rsx! {
                div {
                    class: "max-w-3xl mx-auto px-6 py-16",
                    Banner { level: NoticeLevel::Error, message: message.clone() }
                    Link { to: Route::Products {}, class: "text-emerald-600 font-semibold", "Back to marketplace" }
                }
            }
        }
        Some(Ok(product)) => product.clone(),
    };

    let add = {
        let product = product.clone();
        move |_: MouseEvent| {
            let Some(user) = auth.user() else {
                nav.push(Route::Auth {
                    redirect: format!("/product/{id}"),
                    mode: String::new(),
                });
                return;
            };
            let client = auth.client();
            let cart = cart.clone();
            let product = product.clone();
            let qty = quantity();
            spawn(async move {
                adding.set(true);
                match client.add_to_cart(user.user_id, product.id, qty).await {
                    Ok(_) => {
                        let mut line = CartLine::new(product.id, qty, product.price);
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
                adding.set(false);
            });
        }
    };

    let max_qty = product.stock_quantity.max(1);

    rsx! {
        div {
            class: "max-w-6xl mx-auto px-6 py-16 grid lg:grid-cols-2 gap-12",
            div {
                class: "rounded-3xl overflow-hidden bg-emerald-50 dark:bg-gray-800 h-96 flex items-center justify-center",
                if let Some(src) = product.image_url.as_ref() {
                    img { class: "w-full h-full object-cover", src: "{src}", alt: "{product.name}" }
                } else {
                    span { class: "text-emerald-300", Icon { icon: FaLeaf, width: 80, height: 80 } }
                }
            }
            div {
                class: "flex flex-col gap-4",
                span { class: "text-sm uppercase tracking-wide text-emerald-600", "{product.category_name}" }
                h1 { class: "text-4xl font-black", "{product.name}" }
                div {
                    class: "flex items-center gap-2 text-amber-500",
                    Icon { icon: FaStar, width: 14, height: 14 }
                    "{product.rating:.1}"
                    span { class: "text-gray-400", "({product.reviews} reviews)" }
                }
                p { class: "text-gray-600 dark:text-gray-300 leading-relaxed", "{product.description}" }
                div {
                    class: "flex items-baseline gap-3",
                    span { class: "text-3xl font-bold", "{format_price(product.price)}" }
                    if let Some(pct) = product.discount_percent() {
                        span { class: "line-through text-gray-400", "{format_price(product.original_price)}" }
                        span { class: "text-red-500 font-semibold", "{pct}% off" }
                    }
                }
                div {
                    class: "flex flex-wrap gap-3 text-sm",
                    if let Some(score) = product.carbon_score {
                        span { class: "px-3 py-1 rounded-full {carbon_badge_class(score)}", "{score:.1} kg CO₂ footprint" }
                    }
                    if product.eco_points > 0 {
                        span { class: "px-3 py-1 rounded-full bg-blue-100 text-blue-700", "+{product.eco_points} eco points" }
                    }
                    span {
                        class: "flex items-center gap-1 px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-800",
                        Icon { icon: FaTruck, width: 12, height: 12 }
                        "{product.shipping}"
                    }
                }
                if let Some(seller) = product.seller_name.as_ref() {
                    p { class: "text-sm text-gray-500", "Sold by {seller}" }
                }
                if product.in_stock() {
                    p { class: "text-sm text-emerald-600", "{product.stock_quantity} in stock" }
                    div {
                        class: "flex items-center gap-4 mt-4",
                        input {
                            class: "w-20 px-3 py-2 rounded-xl border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800",
                            r#type: "number",
                            min: "1",
                            max: "{max_qty}",
                            value: "{quantity}",
                            oninput: move |evt: FormEvent| {
                                let n = evt.value().parse::<u32>().unwrap_or(1);
                                quantity.set(n.clamp(1, max_qty));
                            },
                        }
                        button {
                            class: "flex items-center gap-2 px-8 py-3 rounded-xl bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-bold",
                            disabled: adding(),
                            onclick: add,
                            Icon { icon: FaCartPlus, width: 16, height: 16 }
                            "Add to cart"
                        }
                    }
                } else {
                    p { class: "text-red-500 font-semibold", "Out of stock" }
                }
            }
        }
    }
}
