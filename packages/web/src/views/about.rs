use dioxus::prelude::*;
use ui::icons::{FaAward, FaEarthAmericas, FaLeaf, FaShieldHalved};
use ui::Icon;

#[component]
pub fn About() -> Element {
    rsx! {
        div {
            class: "max-w-7xl mx-auto px-6 py-20",
            section {
                class: "max-w-3xl mb-20",
                h1 {
                    class: "text-5xl lg:text-6xl font-black leading-tight mb-8",
                    "Nurturing Nature "
                    br {}
                    span { class: "text-emerald-600", "Through Commerce." }
                }
                p {
                    class: "text-gray-600 dark:text-emerald-100/70 text-lg leading-relaxed mb-8",
                    "EcoBazaarX was born from a simple realization: the power to save our planet lies in our daily choices. We've built an ecosystem where every purchase is an act of restoration."
                }
                div {
                    class: "inline-block p-6 rounded-[2rem] bg-white dark:bg-gray-800 border border-emerald-50 dark:border-emerald-900/30 shadow-xl",
                    span { class: "text-emerald-600", Icon { icon: FaAward, width: 20, height: 20 } }
                    h4 { class: "font-bold mt-2", "Ethical Standards" }
                    p { class: "text-xs text-gray-500", "Every seller is hand-vetted for environmental compliance." }
                }
            }
            section {
                class: "grid md:grid-cols-3 gap-8",
                div {
                    class: "p-10 rounded-[2.5rem] bg-white dark:bg-gray-800 border border-emerald-50 dark:border-emerald-900/30 text-center",
                    span { class: "text-emerald-600", Icon { icon: FaShieldHalved, width: 24, height: 24 } }
                    h3 { class: "text-3xl font-black mt-4", "500+" }
                    p { class: "text-gray-500 font-medium", "Verified Products" }
                }
                div {
                    class: "p-10 rounded-[2.5rem] bg-white dark:bg-gray-800 border border-emerald-50 dark:border-emerald-900/30 text-center",
                    span { class: "text-emerald-600", Icon { icon: FaLeaf, width: 24, height: 24 } }
                    h3 { class: "text-3xl font-black mt-4", "1,200" }
                    p { class: "text-gray-500 font-medium", "Trees Planted" }
                }
                div {
                    class: "p-10 rounded-[2.5rem] bg-white dark:bg-gray-800 border border-emerald-50 dark:border-emerald-900/30 text-center",
                    span { class: "text-emerald-600", Icon { icon: FaEarthAmericas, width: 24, height: 24 } }
                    h3 { class: "text-3xl font-black mt-4", "100%" }
                    p { class: "text-gray-500 font-medium", "Carbon Neutral" }
                }
            }
        }
    }
}
