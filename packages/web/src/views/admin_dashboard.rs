//! Admin console: product approvals, catalog moderation and admin access
//! requests.

use api::{ApiClient, ApiError, PendingAdmin, Product, RejectTarget};
use dioxus::prelude::*;
use ui::icons::{FaBox, FaCheck, FaClipboardCheck, FaShieldHalved, FaTrash, FaXmark};
use ui::notice::push_notice;
use ui::{format_price, use_auth, use_notices, Banner, Icon, LogoutButton, NoticeLevel, Spinner};

#[derive(Clone, Copy, Debug, PartialEq)]
enum AdminTab {
    Overview,
    Approvals,
    Catalog,
    Admins,
}

impl AdminTab {
    const ALL: [AdminTab; 4] = [
        AdminTab::Overview,
        AdminTab::Approvals,
        AdminTab::Catalog,
        AdminTab::Admins,
    ];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Approvals => "Product Approvals",
            AdminTab::Catalog => "Manage Products",
            AdminTab::Admins => "Admin Requests",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AdminTab::Overview => "System Overview",
            AdminTab::Approvals => "Product Approvals",
            AdminTab::Catalog => "Product Management",
            AdminTab::Admins => "Admin Access Requests",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct AdminData {
    pending_admins: Vec<PendingAdmin>,
    pending_products: Vec<Product>,
    all_products: Vec<Product>,
}

impl AdminData {
    async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        Ok(Self {
            pending_admins: client.pending_admins().await?,
            pending_products: client.pending_products().await?,
            all_products: client.all_products().await?,
        })
    }

    fn active_products(&self) -> usize {
        self.all_products.iter().filter(|p| p.is_active).count()
    }
}

/// A moderation action taken from one of the tables.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Moderation {
    ApproveAdmin(i64),
    ApproveProduct(i64),
    Reject(RejectTarget, i64),
    Remove(i64),
}

impl Moderation {
    async fn apply(self, client: &ApiClient) -> Result<(), ApiError> {
        match self {
            Moderation::ApproveAdmin(id) => client.approve_admin(id).await,
            Moderation::ApproveProduct(id) => client.approve_product(id).await,
            Moderation::Reject(target, id) => client.reject(target, id).await,
            Moderation::Remove(id) => client.remove_product(id).await,
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Moderation::ApproveAdmin(_) => "Admin approved",
            Moderation::ApproveProduct(_) => "Product approved",
            Moderation::Reject(RejectTarget::User, _) => "Admin request rejected",
            Moderation::Reject(RejectTarget::Product, _) => "Product rejected",
            Moderation::Remove(_) => "Product removed",
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let auth = use_auth();
    let mut notices = use_notices();
    let mut tab = use_signal(|| AdminTab::Overview);
    let name = auth.user().map(|u| u.display_name()).unwrap_or_default();

    let mut data = use_resource({
        let auth = auth.clone();
        move || {
            let client = auth.client();
            async move {
                AdminData::load(&client)
                    .await
                    .map_err(|e| e.user_message("Failed to load admin data."))
            }
        }
    });

    let moderate = move |action: Moderation| {
        let client = auth.client();
        spawn(async move {
            match action.apply(&client).await {
                Ok(()) => {
                    tracing::info!("Applied {:?}", action);
                    push_notice(&mut notices, NoticeLevel::Success, action.success_message());
                    data.restart();
                }
                Err(e) => {
                    tracing::error!("{:?} failed: {}", action, e);
                    push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Action failed."));
                }
            }
        });
    };

    let body = match &*data.read() {
        None => rsx! { Spinner { label: "Loading dashboard..." } },
        Some(Err(message)) => rsx! { Banner { level: NoticeLevel::Error, message: message.clone() } },
        Some(Ok(loaded)) => {
            let loaded = loaded.clone();
            match tab() {
                AdminTab::Overview => rsx! {
                    div {
                        class: "grid sm:grid-cols-3 gap-6",
                        StatCard { label: "Pending approvals", value: loaded.pending_products.len().to_string() }
                        StatCard { label: "Admin requests", value: loaded.pending_admins.len().to_string() }
                        StatCard { label: "Active products", value: loaded.active_products().to_string() }
                    }
                    div {
                        class: "flex gap-4 mt-8",
                        button {
                            class: "px-5 py-2 rounded-lg bg-emerald-600 text-white font-semibold",
                            onclick: move |_| tab.set(AdminTab::Approvals),
                            "Review products"
                        }
                        button {
                            class: "px-5 py-2 rounded-lg border-2 border-emerald-600 text-emerald-700 font-semibold",
                            onclick: move |_| tab.set(AdminTab::Admins),
                            "Review admins"
                        }
                    }
                },
                AdminTab::Approvals => rsx! {
                    if loaded.pending_products.is_empty() {
                        p { class: "text-gray-500", "No products waiting for approval." }
                    }
                    for product in loaded.pending_products {
                        ProductRow {
                            key: "{product.id}",
                            product: product.clone(),
                            actions: rsx! {
                                ActionButton { label: "Approve", tone: "emerald", icon: "check", onclick: {
                                    let moderate = moderate.clone();
                                    move |_| moderate(Moderation::ApproveProduct(product.id))
                                } }
                                ActionButton { label: "Reject", tone: "red", icon: "x", onclick: {
                                    let moderate = moderate.clone();
                                    move |_| moderate(Moderation::Reject(RejectTarget::Product, product.id))
                                } }
                            },
                        }
                    }
                },
                AdminTab::Catalog => rsx! {
                    if loaded.all_products.is_empty() {
                        p { class: "text-gray-500", "No products in the catalog." }
                    }
                    for product in loaded.all_products {
                        ProductRow {
                            key: "{product.id}",
                            product: product.clone(),
                            actions: rsx! {
                                ActionButton { label: "Remove", tone: "red", icon: "trash", onclick: {
                                    let moderate = moderate.clone();
                                    move |_| moderate(Moderation::Remove(product.id))
                                } }
                            },
                        }
                    }
                },
                AdminTab::Admins => rsx! {
                    if loaded.pending_admins.is_empty() {
                        p { class: "text-gray-500", "No pending admin requests." }
                    }
                    for (index, admin) in loaded.pending_admins.into_iter().enumerate() {
                        div {
                            key: "{admin.id.unwrap_or(index as i64)}",
                            class: "flex items-center justify-between gap-4 p-4 mb-3 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                            div {
                                p { class: "font-semibold", "{admin.username_label()}" }
                                p { class: "text-sm text-gray-500", "{admin.email_label()}" }
                            }
                            if let Some(id) = admin.id {
                                div {
                                    class: "flex gap-2",
                                    ActionButton { label: "Approve", tone: "emerald", icon: "check", onclick: {
                                        let moderate = moderate.clone();
                                        move |_| moderate(Moderation::ApproveAdmin(id))
                                    } }
                                    ActionButton { label: "Reject", tone: "red", icon: "x", onclick: {
                                        let moderate = moderate.clone();
                                        move |_| moderate(Moderation::Reject(RejectTarget::User, id))
                                    } }
                                }
                            }
                        }
                    }
                },
            }
        }
    };

    rsx! {
        div {
            class: "min-h-screen flex bg-gray-50 dark:bg-gray-900",
            aside {
                class: "w-64 flex-shrink-0 flex flex-col p-6 bg-white dark:bg-gray-800 border-r border-gray-100 dark:border-gray-700",
                div {
                    class: "flex items-center gap-2 mb-10 text-emerald-700 font-black text-xl",
                    Icon { icon: FaShieldHalved, width: 20, height: 20 }
                    "Admin"
                }
                nav {
                    class: "flex flex-col gap-2 flex-1",
                    for entry in AdminTab::ALL {
                        button {
                            key: "{entry.label()}",
                            class: if tab() == entry {
                                "text-left px-4 py-2 rounded-lg bg-emerald-600 text-white font-semibold"
                            } else {
                                "text-left px-4 py-2 rounded-lg text-gray-600 dark:text-gray-300 hover:bg-emerald-50 dark:hover:bg-gray-700"
                            },
                            onclick: move |_| tab.set(entry),
                            "{entry.label()}"
                        }
                    }
                }
                LogoutButton { class: "px-4 py-2 rounded-lg border border-red-300 text-red-600 font-semibold" }
            }
            main {
                class: "flex-1 p-10",
                div {
                    class: "flex items-center justify-between mb-8",
                    h1 { class: "text-3xl font-bold", "{tab().title()}" }
                    if !name.is_empty() {
                        span { class: "text-sm text-gray-500", "Signed in as {name}" }
                    }
                }
                {body}
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "p-6 rounded-2xl bg-white dark:bg-gray-800 border border-gray-100 dark:border-gray-700",
            p { class: "text-sm text-gray-500", "{label}" }
            p { class: "text-3xl font-black mt-2", "{value}" }
        }
    }
}

#[component]
fn ProductRow(product: Product, actions: Element) -> Element {
    rsx! {
        div {
            class: "flex items-center gap-4 p-4 mb-3 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
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
                p {
                    class: "text-sm text-gray-500",
                    "{format_price(product.price)} · {product.category_name}"
                    if let Some(seller) = product.seller_name.as_ref() {
                        " · {seller}"
                    }
                }
            }
            div { class: "flex gap-2", {actions} }
        }
    }
}

#[component]
fn ActionButton(
    label: &'static str,
    tone: &'static str,
    icon: &'static str,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let class = match tone {
        "red" => "bg-red-50 text-red-600 hover:bg-red-100",
        _ => "bg-emerald-50 text-emerald-700 hover:bg-emerald-100",
    };
    let glyph = match icon {
        "check" => rsx! { Icon { icon: FaCheck, width: 12, height: 12 } },
        "trash" => rsx! { Icon { icon: FaTrash, width: 12, height: 12 } },
        "x" => rsx! { Icon { icon: FaXmark, width: 12, height: 12 } },
        _ => rsx! { Icon { icon: FaClipboardCheck, width: 12, height: 12 } },
    };

    rsx! {
        button {
            class: "flex items-center gap-1 px-3 py-1.5 rounded-lg text-sm font-semibold {class}",
            onclick: move |evt| onclick.call(evt),
            {glyph}
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::product::normalize_products;
    use serde_json::json;

    #[test]
    fn test_active_products_counts_only_active() {
        let data = AdminData {
            all_products: normalize_products(json!([
                {"id": 1, "name": "A", "isActive": true},
                {"id": 2, "name": "B", "isActive": false},
                {"id": 3, "name": "C", "isActive": true},
            ])),
            ..AdminData::default()
        };
        assert_eq!(data.active_products(), 2);
    }

    #[test]
    fn test_reject_messages_name_the_target() {
        assert_eq!(Moderation::Reject(RejectTarget::User, 1).success_message(), "Admin request rejected");
        assert_eq!(Moderation::Reject(RejectTarget::Product, 1).success_message(), "Product rejected");
        assert_eq!(AdminTab::Catalog.title(), "Product Management");
    }
}
