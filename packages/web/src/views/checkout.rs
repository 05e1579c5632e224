//! Checkout: shipping form, payment choice and order placement.
//!
//! The lines come from the signed-in user's server cart when it has any,
//! otherwise from the local snapshot. Only cash on delivery can be placed.

use api::{GreenerAlternative, OrderRequest, PaymentMethod, ShippingInfo, UPI_UNAVAILABLE};
use dioxus::prelude::*;
use store::{CartLine, CartSnapshot};
use ui::forms::{validate_shipping, FieldErrors};
use ui::icons::{FaCircleCheck, FaLock, FaMinus, FaPlus};
use ui::notice::push_notice;
use ui::{
    format_price, use_auth, use_cart, use_notices, Banner, GreenerAlternativeCard, Icon,
    NoticeLevel, Spinner, TextArea, TextField,
};

use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq)]
enum CartSource {
    Server,
    Local,
}

fn line_label(line: &CartLine) -> String {
    line.name
        .clone()
        .unwrap_or_else(|| format!("Product #{}", line.product_id))
}

/// Swap the line at `index` for `replacement`, keeping its quantity.
fn swap_line(lines: &mut [CartLine], index: usize, replacement: CartLine) {
    if let Some(slot) = lines.get_mut(index) {
        *slot = CartLine {
            quantity: slot.quantity,
            ..replacement
        };
    }
}

#[component]
pub fn Checkout() -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let mut notices = use_notices();
    let user = auth.user();

    let mut lines = use_signal(Vec::<CartLine>::new);
    let mut source = use_signal(|| CartSource::Local);
    let mut loading = use_signal(|| true);
    let mut shipping = use_signal(|| user.as_ref().map(ShippingInfo::for_user).unwrap_or_default());
    let mut payment = use_signal(PaymentMethod::default);
    let mut notes = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut processing = use_signal(|| false);
    let mut placed = use_signal(|| Option::<String>::None);

    let _loader = use_resource({
        let auth = auth.clone();
        let cart = cart.clone();
        move || {
            let client = auth.client();
            let user = auth.user();
            let cart = cart.clone();
            async move {
                loading.set(true);
                let server = match user {
                    Some(user) => match client.cart_listing(user.user_id).await {
                        Ok(items) => items,
                        Err(e) => {
                            tracing::warn!("Server cart unavailable, using local cart: {}", e);
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                };
                if server.is_empty() {
                    source.set(CartSource::Local);
                    lines.set(cart.snapshot().into_lines());
                } else {
                    source.set(CartSource::Server);
                    lines.set(server.iter().map(|item| item.to_line()).collect());
                }
                loading.set(false);
            }
        }
    });

    let place_order = {
        let auth = auth.clone();
        let cart = cart.clone();
        move |_: MouseEvent| {
            error.set(None);
            if let Err(e) = validate_shipping(&shipping.read()) {
                errors.set(e);
                error.set(Some("Please fill in all required fields".to_string()));
                return;
            }
            errors.set(FieldErrors::default());
            let Some(user) = auth.user() else {
                error.set(Some("You must be logged in to place an order.".to_string()));
                return;
            };
            if lines.read().is_empty() {
                error.set(Some("Cart is empty.".to_string()));
                return;
            }
            if !payment().is_available() {
                push_notice(&mut notices, NoticeLevel::Warning, UPI_UNAVAILABLE);
                return;
            }
            let request = OrderRequest::new(&lines.read(), &shipping.read(), &notes.read());
            let client = auth.client();
            let cart = cart.clone();
            spawn(async move {
                processing.set(true);
                match client.create_order(&request).await {
                    Ok(confirmation) => {
                        tracing::info!("Order {} placed", confirmation.reference());
                        if let Err(e) = client.clear_cart(user.user_id).await {
                            tracing::warn!("Server cart not cleared after order: {}", e);
                        }
                        if let Err(e) = cart.clear() {
                            tracing::warn!("Local cart not cleared after order: {}", e);
                            cart.notify_changed();
                        }
                        lines.set(Vec::new());
                        placed.set(Some(confirmation.reference()));
                    }
                    Err(e) => {
                        tracing::error!("Order failed: {}", e);
                        error.set(Some(e.user_message("Order failed")));
                    }
                }
                processing.set(false);
            });
        }
    };

    let swap = {
        let auth = auth.clone();
        let cart = cart.clone();
        move |(index, alternative): (usize, GreenerAlternative)| {
            let Some(current) = lines.read().get(index).cloned() else {
                return;
            };
            let Some(replacement) = alternative.to_cart_line(current.quantity) else {
                return;
            };
            let name = alternative.display_name();
            match source() {
                CartSource::Local => {
                    swap_line(&mut lines.write(), index, replacement);
                    if let Err(e) = cart.replace(lines()) {
                        tracing::warn!("Failed to persist swapped cart: {}", e);
                    }
                    push_notice(&mut notices, NoticeLevel::Success, &format!("Replaced with greener alternative: {name}"));
                }
                CartSource::Server => {
                    let Some(user) = auth.user() else {
                        return;
                    };
                    let client = auth.client();
                    let cart = cart.clone();
                    spawn(async move {
                        let removed = match current.cart_id {
                            Some(cart_id) => client.remove_cart_row(cart_id).await.map(|_| ()),
                            None => Ok(()),
                        };
                        let added = match removed {
                            Ok(()) => client
                                .add_to_cart(user.user_id, replacement.product_id, replacement.quantity)
                                .await
                                .map(|_| ()),
                            Err(e) => Err(e),
                        };
                        match added {
                            Ok(()) => {
                                if let Err(e) = cart.swap_line(&current, replacement.clone()) {
                                    tracing::warn!("Failed to mirror swapped cart line: {}", e);
                                    cart.notify_changed();
                                }
                                swap_line(&mut lines.write(), index, replacement);
                                push_notice(&mut notices, NoticeLevel::Success, &format!("Replaced with greener alternative: {name}"));
                            }
                            Err(e) => {
                                tracing::error!("Swap failed: {}", e);
                                push_notice(&mut notices, NoticeLevel::Error, "Failed to replace product. Please try again.");
                            }
                        }
                    });
                }
            }
        }
    };

    let set_quantity = move |(product_id, quantity): (i64, u32)| {
        let mut lines = lines;
        match cart.set_quantity(product_id, quantity) {
            Ok(snapshot) => lines.set(snapshot.into_lines()),
            Err(e) => tracing::warn!("Failed to update quantity: {}", e),
        }
    };

    if loading() {
        return rsx! { Spinner { label: "Preparing checkout..." } };
    }

    if let Some(reference) = placed() {
        return rsx! {
            div {
                class: "max-w-xl mx-auto px-6 py-24 text-center",
                span { class: "inline-block text-emerald-600 mb-6", Icon { icon: FaCircleCheck, width: 64, height: 64 } }
                h1 { class: "text-3xl font-black mb-2", "Order placed!" }
                if !reference.is_empty() {
                    p { class: "text-gray-500 mb-8", "Order reference: #{reference}" }
                }
                div {
                    class: "flex justify-center gap-4",
                    Link { to: Route::Orders {}, class: "px-6 py-3 rounded-full bg-emerald-600 text-white font-semibold", "Track Orders" }
                    Link { to: Route::Products {}, class: "px-6 py-3 rounded-full border-2 border-emerald-600 text-emerald-700 font-semibold", "Keep Shopping" }
                }
            }
        };
    }

    let current = lines();
    let summary = CartSnapshot::new(current.clone());
    let editable = source() == CartSource::Local;
    let field_error = move |name: &str| errors.read().get(name).map(str::to_string);
    let info = shipping();

    rsx! {
        div {
            class: "max-w-7xl mx-auto px-4 py-16",
            h1 { class: "text-3xl font-bold mb-8", "Checkout" }
            if let Some(message) = error() {
                Banner { level: NoticeLevel::Error, message, on_dismiss: move |_| error.set(None) }
            }
            div {
                class: "grid lg:grid-cols-3 gap-8",
                div {
                    class: "lg:col-span-2 flex flex-col gap-8",
                    section {
                        class: "p-6 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                        h2 { class: "text-xl font-bold mb-6", "Shipping Information" }
                        div {
                            class: "grid sm:grid-cols-2 gap-4",
                            TextField { label: "First name", value: info.first_name.clone(), oninput: move |v| shipping.write().first_name = v, error: field_error("first_name") }
                            TextField { label: "Last name", value: info.last_name.clone(), oninput: move |v| shipping.write().last_name = v, error: field_error("last_name") }
                            TextField { label: "Email", input_type: "email", value: info.email.clone(), oninput: move |v| shipping.write().email = v, error: field_error("email") }
                            TextField { label: "Phone", input_type: "tel", value: info.phone.clone(), oninput: move |v| shipping.write().phone = v, error: field_error("phone") }
                        }
                        div {
                            class: "mt-4",
                            TextField { label: "Address", value: info.address.clone(), oninput: move |v| shipping.write().address = v, error: field_error("address") }
                        }
                        div {
                            class: "grid sm:grid-cols-2 gap-4 mt-4",
                            TextField { label: "City", value: info.city.clone(), oninput: move |v| shipping.write().city = v, error: field_error("city") }
                            TextField { label: "State", value: info.state.clone(), oninput: move |v| shipping.write().state = v, error: field_error("state") }
                            TextField { label: "ZIP code", value: info.zip_code.clone(), oninput: move |v| shipping.write().zip_code = v, error: field_error("zip_code") }
                            TextField { label: "Country", value: info.country.clone(), oninput: move |v| shipping.write().country = v }
                        }
                        div {
                            class: "mt-4",
                            TextArea { label: "Order notes (optional)", value: notes(), oninput: move |v| notes.set(v) }
                        }
                    }
                    section {
                        class: "p-6 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                        h2 { class: "text-xl font-bold mb-6", "Payment Method" }
                        div {
                            class: "flex flex-col gap-3",
                            for method in [PaymentMethod::CashOnDelivery, PaymentMethod::Upi] {
                                label {
                                    key: "{method.title()}",
                                    class: if payment() == method {
                                        "flex items-start gap-3 p-4 rounded-xl border-2 border-emerald-500 cursor-pointer"
                                    } else {
                                        "flex items-start gap-3 p-4 rounded-xl border-2 border-gray-200 dark:border-gray-700 cursor-pointer"
                                    },
                                    input {
                                        r#type: "radio",
                                        name: "payment",
                                        checked: payment() == method,
                                        onchange: move |_| {
                                            payment.set(method);
                                            if !method.is_available() {
                                                push_notice(&mut notices, NoticeLevel::Warning, UPI_UNAVAILABLE);
                                            }
                                        },
                                    }
                                    div {
                                        p { class: "font-semibold", "{method.title()}" }
                                        p { class: "text-sm text-gray-500", "{method.description()}" }
                                    }
                                }
                            }
                        }
                    }
                }
                aside {
                    class: "p-6 rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800 h-fit sticky top-24",
                    h2 { class: "text-xl font-bold mb-6", "Order Summary" }
                    if current.is_empty() {
                        p { class: "text-gray-500 mb-6", "Your cart is empty." }
                    }
                    for (index, line) in current.into_iter().enumerate() {
                        div {
                            key: "{index}-{line.product_id}",
                            class: "pb-4 mb-4 border-b border-gray-100 dark:border-gray-700",
                            div {
                                class: "flex justify-between gap-3 text-sm",
                                span { class: "font-medium", "{line_label(&line)}" }
                                span { "{format_price(line.line_total())}" }
                            }
                            div {
                                class: "flex items-center gap-2 mt-1 text-xs text-gray-500",
                                if editable {
                                    button {
                                        class: "p-1 rounded border border-gray-200",
                                        onclick: {
                                            let set_quantity = set_quantity.clone();
                                            move |_| set_quantity((line.product_id, line.quantity.saturating_sub(1)))
                                        },
                                        Icon { icon: FaMinus, width: 8, height: 8 }
                                    }
                                }
                                "Qty {line.quantity}"
                                if editable {
                                    button {
                                        class: "p-1 rounded border border-gray-200",
                                        onclick: {
                                            let set_quantity = set_quantity.clone();
                                            move |_| set_quantity((line.product_id, line.quantity + 1))
                                        },
                                        Icon { icon: FaPlus, width: 8, height: 8 }
                                    }
                                }
                            }
                            LineAlternative {
                                line: line.clone(),
                                on_swap: {
                                    let mut swap = swap.clone();
                                    move |alternative| swap((index, alternative))
                                },
                            }
                        }
                    }
                    div {
                        class: "space-y-2 text-sm",
                        div { class: "flex justify-between", span { "Subtotal" } span { "{format_price(summary.subtotal())}" } }
                        div {
                            class: "flex justify-between",
                            span { "Shipping" }
                            if summary.shipping() == 0.0 {
                                span { class: "text-emerald-600", "Free" }
                            } else {
                                span { "{format_price(summary.shipping())}" }
                            }
                        }
                        div { class: "flex justify-between text-lg font-bold pt-2", span { "Total" } span { "{format_price(summary.total())}" } }
                    }
                    button {
                        class: "mt-6 w-full flex items-center justify-center gap-2 py-3 rounded-lg bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-semibold",
                        disabled: processing(),
                        onclick: place_order,
                        Icon { icon: FaLock, width: 14, height: 14 }
                        if processing() { "Placing order..." } else { "Place Order" }
                    }
                }
            }
        }
    }
}

/// Greener suggestion for one checkout line; renders nothing when there is none.
#[component]
fn LineAlternative(line: CartLine, on_swap: EventHandler<GreenerAlternative>) -> Element {
    let auth = use_auth();
    let product_id = line.product_id;
    let alternative = use_resource(use_reactive!(|(product_id,)| {
        let client = auth.client();
        async move { client.greener_alternative(product_id).await }
    }));

    let Some(Some(alternative)) = alternative.read().clone() else {
        return rsx! {};
    };
    if alternative.id == Some(line.product_id) {
        return rsx! {};
    }

    rsx! {
        GreenerAlternativeCard {
            alternative,
            current_name: line_label(&line),
            current_price: line.price,
            current_carbon: None,
            on_swap: move |chosen| on_swap.call(chosen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_keeps_quantity() {
        let mut lines = vec![CartLine::new(1, 3, 100.0), CartLine::new(2, 1, 50.0)];
        swap_line(&mut lines, 0, CartLine::new(9, 1, 80.0));
        assert_eq!(lines[0].product_id, 9);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, 80.0);

        swap_line(&mut lines, 5, CartLine::new(7, 1, 1.0));
        assert_eq!(lines.len(), 2);
    }
}
