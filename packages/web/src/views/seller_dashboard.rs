use api::{ApiClient, ApiError, Product, SellerStats, SELLER_CATEGORIES};
use dioxus::prelude::*;
use ui::forms::{FieldErrors, ProductForm};
use ui::icons::{FaBox, FaChartLine, FaLeaf, FaPen, FaPlus, FaStore, FaTrash, FaXmark};
use ui::notice::push_notice;
use ui::{
    format_price, use_auth, use_notices, Banner, Icon, LogoutButton, NoticeLevel, Spinner,
    TextArea, TextField,
};

#[derive(Clone, Debug, Default, PartialEq)]
struct SellerData {
    products: Vec<Product>,
    stats: SellerStats,
}

impl SellerData {
    async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        let products = client.seller_products().await?;
        let stats = client.seller_stats(&products).await;
        Ok(Self { products, stats })
    }
}

/// Which product the form is editing, if any.
#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    Create,
    Update(i64),
}

fn category_name(id: &str) -> &'static str {
    id.parse::<i64>()
        .ok()
        .and_then(|id| SELLER_CATEGORIES.iter().find(|(cid, _)| *cid == id))
        .map(|(_, name)| *name)
        .unwrap_or("Uncategorized")
}

#[component]
pub fn SellerDashboard() -> Element {
    let auth = use_auth();
    let mut notices = use_notices();
    let mut editor = use_signal(|| Editor::Closed);
    let mut form = use_signal(ProductForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut saving = use_signal(|| false);
    let name = auth.user().map(|u| u.display_name()).unwrap_or_default();

    let mut data = use_resource({
        let auth = auth.clone();
        move || {
            let client = auth.client();
            async move {
                SellerData::load(&client)
                    .await
                    .map_err(|e| e.user_message("Failed to load your products."))
            }
        }
    });

    let mut open_create = move || {
        form.set(ProductForm::default());
        errors.set(FieldErrors::default());
        editor.set(Editor::Create);
    };

    let mut open_edit = move |product: Product| {
        form.set(ProductForm::from_product(&product));
        errors.set(FieldErrors::default());
        editor.set(Editor::Update(product.id));
    };

    let submit = {
        let auth = auth.clone();
        move |_: MouseEvent| {
            let payload = match form.read().validate() {
                Ok(payload) => payload,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            let mode = editor();
            let client = auth.client();
            spawn(async move {
                saving.set(true);
                let result = match mode {
                    Editor::Update(id) => client.update_product(id, &payload).await,
                    _ => client.create_product(&payload).await,
                };
                match result {
                    Ok(()) => {
                        let message = if matches!(mode, Editor::Update(_)) {
                            "Product updated"
                        } else {
                            "Product submitted for approval"
                        };
                        push_notice(&mut notices, NoticeLevel::Success, message);
                        editor.set(Editor::Closed);
                        data.restart();
                    }
                    Err(e) => {
                        tracing::error!("Saving product failed: {}", e);
                        push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to save product."));
                    }
                }
                saving.set(false);
            });
        }
    };

    let delete = move |id: i64| {
        let client = auth.client();
        spawn(async move {
            match client.delete_product(id).await {
                Ok(()) => {
                    push_notice(&mut notices, NoticeLevel::Info, "Product deleted");
                    data.restart();
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to delete product.")),
            }
        });
    };

    let body = match &*data.read() {
        None => rsx! { Spinner { label: "Loading your store..." } },
        Some(Err(message)) => rsx! { Banner { level: NoticeLevel::Error, message: message.clone() } },
        Some(Ok(loaded)) => {
            let loaded = loaded.clone();
            let stats = loaded.stats.clone();
            rsx! {
                div {
                    class: "grid sm:grid-cols-2 lg:grid-cols-4 gap-6 mb-10",
                    SellerStat { label: "Total Sales", value: format_price(stats.total_sales.unwrap_or_default()) }
                    SellerStat { label: "Orders", value: stats.total_orders.unwrap_or_default().to_string() }
                    SellerStat { label: "Products", value: stats.total_products.unwrap_or_default().to_string() }
                    SellerStat { label: "Carbon Score", value: format!("{:.1}", stats.carbon_saved.unwrap_or_default()) }
                }
                div {
                    class: "rounded-2xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800 divide-y divide-gray-100 dark:divide-gray-700",
                    if loaded.products.is_empty() {
                        p { class: "p-8 text-center text-gray-500", "You have not listed any products yet." }
                    }
                    for product in loaded.products {
                        div {
                            key: "{product.id}",
                            class: "flex items-center gap-4 p-4",
                            div {
                                class: "w-14 h-14 flex-shrink-0 rounded-lg overflow-hidden bg-emerald-50 flex items-center justify-center text-emerald-400",
                                if let Some(src) = product.image_url.as_ref() {
                                    img { class: "w-full h-full object-cover", src: "{src}", alt: "{product.name}" }
                                } else {
                                    Icon { icon: FaBox, width: 20, height: 20 }
                                }
                            }
                            div {
                                class: "flex-1",
                                p { class: "font-semibold", "{product.name}" }
                                p { class: "text-sm text-gray-500", "{format_price(product.price)} · {product.stock_quantity} in stock" }
                            }
                            span {
                                class: if product.is_active {
                                    "px-3 py-1 rounded-full text-xs font-bold bg-emerald-100 text-emerald-700"
                                } else {
                                    "px-3 py-1 rounded-full text-xs font-bold bg-amber-100 text-amber-700"
                                },
                                if product.is_active { "LIVE" } else { "PENDING" }
                            }
                            button {
                                class: "p-2 rounded-lg text-blue-600 hover:bg-blue-50",
                                title: "Edit",
                                onclick: {
                                    let product = product.clone();
                                    move |_| open_edit(product.clone())
                                },
                                Icon { icon: FaPen, width: 14, height: 14 }
                            }
                            button {
                                class: "p-2 rounded-lg text-red-600 hover:bg-red-50",
                                title: "Delete",
                                onclick: {
                                    let delete = delete.clone();
                                    let id = product.id;
                                    move |_| delete(id)
                                },
                                Icon { icon: FaTrash, width: 14, height: 14 }
                            }
                        }
                    }
                }
            }
        }
    };

    let current = form();
    let field_error = move |name: &str| errors.read().get(name).map(str::to_string);

    rsx! {
        div {
            class: "max-w-6xl mx-auto px-6 py-12",
            div {
                class: "flex flex-wrap items-center justify-between gap-4 mb-10",
                div {
                    h1 {
                        class: "flex items-center gap-3 text-3xl font-bold",
                        span { class: "text-emerald-600", Icon { icon: FaStore, width: 26, height: 26 } }
                        "Seller Dashboard"
                    }
                    if !name.is_empty() {
                        p { class: "text-gray-500 mt-1", "Welcome back, {name}" }
                    }
                }
                div {
                    class: "flex gap-3",
                    button {
                        class: "flex items-center gap-2 px-5 py-2.5 rounded-lg bg-emerald-600 hover:bg-emerald-700 text-white font-semibold",
                        onclick: move |_| open_create(),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        "Add Product"
                    }
                    LogoutButton { class: "px-5 py-2.5 rounded-lg border border-red-300 text-red-600 font-semibold" }
                }
            }
            {body}
            if editor() != Editor::Closed {
                div {
                    class: "fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4",
                    div {
                        class: "w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-2xl bg-white dark:bg-gray-800 p-8",
                        div {
                            class: "flex items-center justify-between mb-6",
                            h2 {
                                class: "text-2xl font-bold",
                                if matches!(editor(), Editor::Update(_)) { "Edit Product" } else { "Add New Product" }
                            }
                            button {
                                class: "p-2 rounded-lg hover:bg-gray-100 dark:hover:bg-gray-700",
                                onclick: move |_| editor.set(Editor::Closed),
                                Icon { icon: FaXmark, width: 16, height: 16 }
                            }
                        }
                        div {
                            class: "grid sm:grid-cols-2 gap-4",
                            TextField { label: "Product name", value: current.name.clone(), oninput: move |v| form.write().name = v, error: field_error("name") }
                            TextField { label: "Price (₹)", input_type: "number", value: current.price.clone(), oninput: move |v| form.write().price = v, error: field_error("price") }
                            label {
                                class: "block text-sm",
                                span { class: "font-medium text-gray-700 dark:text-gray-300", "Category" }
                                select {
                                    class: "w-full mt-1.5 px-4 py-2.5 rounded-xl border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800",
                                    value: "{current.category_id}",
                                    onchange: move |evt: FormEvent| form.write().category_id = evt.value(),
                                    for (id, label) in SELLER_CATEGORIES.iter().copied() {
                                        option { key: "{id}", value: "{id}", selected: current.category_id == id.to_string(), "{label}" }
                                    }
                                }
                                if let Some(message) = field_error("category_id") {
                                    span { class: "block mt-1 text-xs text-red-500", "{message}" }
                                }
                            }
                            TextField { label: "Stock quantity", input_type: "number", value: current.stock_quantity.clone(), oninput: move |v| form.write().stock_quantity = v, error: field_error("stock_quantity") }
                            TextField { label: "Weight (kg)", input_type: "number", value: current.weight.clone(), oninput: move |v| form.write().weight = v, error: field_error("weight") }
                            TextField { label: "Shipping distance (km)", input_type: "number", value: current.shipping_distance.clone(), oninput: move |v| form.write().shipping_distance = v, error: field_error("shipping_distance") }
                            TextField { label: "Carbon footprint score", input_type: "number", value: current.carbon_footprint_score.clone(), oninput: move |v| form.write().carbon_footprint_score = v, error: field_error("carbon_footprint_score") }
                            TextField { label: "Image URL", value: current.image_url.clone(), oninput: move |v| form.write().image_url = v }
                        }
                        div {
                            class: "mt-4",
                            TextArea { label: "Description", value: current.description.clone(), oninput: move |v| form.write().description = v }
                        }
                        label {
                            class: "flex items-center gap-2 mt-4 text-sm",
                            input {
                                r#type: "checkbox",
                                checked: current.eco_friendly,
                                onchange: move |evt: FormEvent| form.write().eco_friendly = evt.checked(),
                            }
                            span { class: "text-emerald-600", Icon { icon: FaLeaf, width: 12, height: 12 } }
                            "Eco-friendly product"
                        }
                        p { class: "mt-2 text-xs text-gray-500", "Category: {category_name(&current.category_id)}" }
                        div {
                            class: "flex justify-end gap-3 mt-8",
                            button {
                                class: "px-5 py-2.5 rounded-lg border border-gray-200 dark:border-gray-700",
                                onclick: move |_| editor.set(Editor::Closed),
                                "Cancel"
                            }
                            button {
                                class: "flex items-center gap-2 px-5 py-2.5 rounded-lg bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-semibold",
                                disabled: saving(),
                                onclick: submit,
                                Icon { icon: FaChartLine, width: 14, height: 14 }
                                if saving() { "Saving..." } else { "Save Product" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SellerStat(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "p-6 rounded-2xl bg-white dark:bg-gray-800 border border-gray-100 dark:border-gray-700",
            p { class: "text-sm text-gray-500", "{label}" }
            p { class: "text-2xl font-black mt-2", "{value}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_lookup() {
        assert_eq!(category_name("2"), "Fashion");
        assert_eq!(category_name(" 9"), "Uncategorized");
        assert_eq!(category_name("abc"), "Uncategorized");
    }
}
