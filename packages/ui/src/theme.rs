//! Light/dark theme toggle.
//!
//! The preference is read once from storage and applied as the `dark` class on
//! `<html>`, which the Tailwind `dark:` variants key off.

use dioxus::prelude::*;
use store::{load_theme, save_theme, Theme};

use crate::icons::{FaMoon, FaSun};
use crate::storage::make_local_store;
use crate::Icon;

/// Set or clear the `dark` class on the document element.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let result = if theme.is_dark() {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
        if let Err(e) = result {
            tracing::warn!("Failed to apply theme: {:?}", e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_signal(|| load_theme(&make_local_store()));

    use_effect(move || {
        let current = theme();
        apply_theme(current);
        save_theme(&make_local_store(), current);
    });

    let dark = theme().is_dark();
    let knob = if dark { "translate-x-6" } else { "translate-x-0" };

    rsx! {
        button {
            class: "relative w-14 h-8 flex items-center bg-gray-200 dark:bg-emerald-900/40 rounded-full p-1 border border-emerald-100 dark:border-emerald-800",
            "aria-label": "Toggle Dark Mode",
            onclick: move |_| theme.set(theme().toggled()),
            div {
                class: "absolute w-6 h-6 bg-white dark:bg-emerald-500 rounded-full shadow-md flex items-center justify-center transition-transform {knob}",
                if dark {
                    Icon { icon: FaMoon, width: 12, height: 12 }
                } else {
                    Icon { icon: FaSun, width: 12, height: 12 }
                }
            }
        }
    }
}
