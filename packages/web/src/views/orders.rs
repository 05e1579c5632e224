use std::time::Duration;

use api::{ApiClient, ClientConfig, Order, OrderStatus, TreePlanting};
use chrono::Utc;
use dioxus::prelude::*;
use ui::icons::{FaBox, FaCircleCheck, FaTree, FaTruck};
use ui::notice::push_notice;
use ui::{format_price, use_auth, use_notices, Banner, Icon, NoticeLevel, Spinner};

use crate::Route;

fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Delivered => "bg-emerald-100 text-emerald-700",
        OrderStatus::Shipped => "bg-blue-100 text-blue-700",
        OrderStatus::Confirmed => "bg-indigo-100 text-indigo-700",
        OrderStatus::Cancelled => "bg-red-100 text-red-700",
        OrderStatus::Pending | OrderStatus::Unknown => "bg-amber-100 text-amber-700",
    }
}

fn tree_planting_label(state: TreePlanting) -> &'static str {
    match state {
        TreePlanting::Available => "Plant a tree for this order",
        TreePlanting::Expired => "Tree planting window closed",
        TreePlanting::NotDelivered => "Tree planting opens after delivery",
    }
}

fn order_label(order: &Order) -> String {
    match order.id {
        Some(id) => format!("Order #{id}"),
        None => "Order".to_string(),
    }
}

fn placed_label(order: &Order) -> Option<String> {
    order
        .created_at
        .map(|at| format!("Placed {}", at.format("%d %b %Y, %H:%M")))
}

fn ship_to(order: &Order) -> String {
    order.ship_to_summary().unwrap_or_else(|| "N/A".to_string())
}

/// Newest orders first; orders without a timestamp sink to the bottom.
fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

async fn fetch_orders(
    client: ApiClient,
    mut orders: Signal<Vec<Order>>,
    mut error: Signal<Option<String>>,
) {
    match client.customer_orders().await {
        Ok(loaded) => {
            orders.set(newest_first(loaded));
            error.set(None);
        }
        Err(e) => {
            tracing::error!("Orders load failed: {}", e);
            error.set(Some(e.user_message("Failed to load orders.")));
        }
    }
}

#[component]
pub fn Orders() -> Element {
    let auth = use_auth();
    let config = use_context::<ClientConfig>();
    let mut notices = use_notices();
    let orders = use_signal(Vec::<Order>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut confirming = use_signal(|| Option::<i64>::None);

    let _poller = use_future({
        let auth = auth.clone();
        let interval = config.orders.poll_interval_secs;
        move || {
            let auth = auth.clone();
            async move {
                fetch_orders(auth.client(), orders, error).await;
                loading.set(false);
                if interval == 0 {
                    return;
                }
                loop {
                    ui::sleep(Duration::from_secs(u64::from(interval))).await;
                    tracing::trace!("Polling orders");
                    fetch_orders(auth.client(), orders, error).await;
                }
            }
        }
    });

    let mark_delivered = move |order_id: i64| {
        let client = auth.client();
        spawn(async move {
            confirming.set(Some(order_id));
            match client.mark_delivered(order_id).await {
                Ok(()) => {
                    push_notice(&mut notices, NoticeLevel::Success, "Thanks! Order marked as delivered.");
                    fetch_orders(client, orders, error).await;
                }
                Err(e) => {
                    push_notice(&mut notices, NoticeLevel::Error, &e.user_message("Failed to update order."));
                }
            }
            confirming.set(None);
        });
    };

    if loading() {
        return rsx! { Spinner { label: "Loading your orders..." } };
    }

    let current = orders();
    let now = Utc::now();

    rsx! {
        div {
            class: "max-w-5xl mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold mb-8", "My Orders" }
            if let Some(message) = error() {
                Banner { level: NoticeLevel::Error, message, on_dismiss: move |_| error.set(None) }
            }
            if current.is_empty() {
                div {
                    class: "text-center py-24",
                    span { class: "inline-block text-gray-300 mb-4", Icon { icon: FaBox, width: 48, height: 48 } }
                    h2 { class: "text-2xl font-bold mb-2", "No orders yet" }
                    Link { to: Route::Products {}, class: "text-emerald-600 font-semibold", "Start shopping" }
                }
            }
            div {
                class: "flex flex-col gap-6",
                for order in current {
                    div {
                        key: "{order.id.unwrap_or_default()}",
                        class: "p-6 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                        div {
                            class: "flex flex-wrap items-center justify-between gap-4 mb-4",
                            div {
                                p { class: "font-bold", "{order_label(&order)}" }
                                if let Some(placed) = placed_label(&order) {
                                    p { class: "text-sm text-gray-500", "{placed}" }
                                }
                            }
                            span { class: "px-3 py-1 rounded-full text-xs font-bold {status_class(order.status)}", "{order.status.label()}" }
                        }
                        div {
                            class: "divide-y divide-gray-100 dark:divide-gray-700",
                            for (index, item) in order.order_items.iter().enumerate() {
                                div {
                                    key: "{index}",
                                    class: "flex items-center gap-4 py-3",
                                    if let Some(src) = item.image_url() {
                                        img { class: "w-12 h-12 rounded-lg object-cover", src: "{src}", alt: "{item.name()}" }
                                    }
                                    span { class: "flex-1", "{item.name()}" }
                                    span { class: "text-sm text-gray-500", "x{item.quantity.unwrap_or(1)}" }
                                    span { class: "font-medium", "{format_price(item.price.unwrap_or_default())}" }
                                }
                            }
                        }
                        div {
                            class: "grid sm:grid-cols-3 gap-4 mt-4 text-sm",
                            div {
                                p { class: "text-gray-500", "Payment" }
                                p { class: "font-medium", "{order.payment_label()}" }
                            }
                            div {
                                p { class: "text-gray-500", "Ship To" }
                                p { class: "font-medium", "{ship_to(&order)}" }
                            }
                            div {
                                p { class: "text-gray-500", "Total" }
                                p { class: "font-bold", "{format_price(order.total_price.unwrap_or_default())}" }
                            }
                        }
                        div {
                            class: "flex flex-wrap items-center justify-between gap-4 mt-4 pt-4 border-t border-gray-100 dark:border-gray-700",
                            span {
                                class: "flex items-center gap-2 text-sm text-emerald-700",
                                Icon { icon: FaTree, width: 14, height: 14 }
                                "{tree_planting_label(order.tree_planting(now))}"
                            }
                            if let (true, Some(order_id)) = (order.status.can_confirm_delivery(), order.id) {
                                button {
                                    class: "flex items-center gap-2 px-4 py-2 rounded-lg bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white text-sm font-semibold",
                                    disabled: confirming() == Some(order_id),
                                    onclick: {
                                        let mark_delivered = mark_delivered.clone();
                                        move |_| mark_delivered(order_id)
                                    },
                                    Icon { icon: FaTruck, width: 14, height: 14 }
                                    "Mark as delivered"
                                }
                            } else if order.status == OrderStatus::Delivered {
                                span {
                                    class: "flex items-center gap-2 text-sm text-emerald-600",
                                    Icon { icon: FaCircleCheck, width: 14, height: 14 }
                                    "Delivered"
                                }
                            }
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
    use api::models::order::normalize_orders;
    use serde_json::json;

    #[test]
    fn test_newest_first() {
        let orders = normalize_orders(json!([
            {"id": 1, "status": "PENDING", "createdAt": "2026-01-01T10:00:00"},
            {"id": 2, "status": "SHIPPED"},
            {"id": 3, "status": "DELIVERED", "createdAt": "2026-03-01T10:00:00Z"},
        ]));
        let ids: Vec<_> = newest_first(orders).into_iter().filter_map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_status_classes_differ_for_terminal_states() {
        assert_ne!(status_class(OrderStatus::Delivered), status_class(OrderStatus::Cancelled));
        assert_eq!(status_class(OrderStatus::Unknown), status_class(OrderStatus::Pending));
    }
}
