use api::GreenerAlternative;
use dioxus::prelude::*;

use crate::icons::FaSeedling;
use crate::product_card::format_price;
use crate::Icon;

/// Suggests swapping a cart line for a lower-emission product.
#[component]
pub fn GreenerAlternativeCard(
    alternative: GreenerAlternative,
    current_name: String,
    current_price: f64,
    current_carbon: Option<f64>,
    on_swap: EventHandler<GreenerAlternative>,
) -> Element {
    let reduction = current_carbon
        .map(|c| alternative.carbon_reduction_percent(c))
        .unwrap_or(0);
    let diff = alternative.price_difference(current_price);
    let diff_label = if diff > 0.0 {
        format!("+{}", format_price(diff))
    } else {
        format!("-{}", format_price(diff.abs()))
    };
    let name = alternative.display_name();
    let chosen = alternative.clone();

    rsx! {
        div {
            class: "mt-3 flex items-center gap-4 p-3 rounded-xl border border-emerald-200 dark:border-emerald-800 bg-emerald-50/60 dark:bg-emerald-900/20",
            if let Some(src) = alternative.image() {
                img { class: "w-14 h-14 rounded-lg object-cover", src: "{src}", alt: "{name}" }
            } else {
                div {
                    class: "w-14 h-14 rounded-lg flex items-center justify-center bg-emerald-100 text-emerald-600",
                    Icon { icon: FaSeedling, width: 20, height: 20 }
                }
            }
            div {
                class: "flex-1 text-sm",
                p { class: "font-semibold text-emerald-800 dark:text-emerald-300", "Greener pick instead of {current_name}" }
                p { class: "text-gray-700 dark:text-gray-300", "{name} · {format_price(alternative.price())}" }
                p {
                    class: "text-xs text-gray-500",
                    if reduction > 0 {
                        "{reduction}% less CO₂ · "
                    }
                    "{diff_label}"
                }
            }
            button {
                class: "px-3 py-2 rounded-lg bg-emerald-600 hover:bg-emerald-700 text-white text-xs font-semibold",
                onclick: move |_| on_swap.call(chosen.clone()),
                "Swap"
            }
        }
    }
}
