use dioxus::prelude::*;

const INPUT: &str = "w-full mt-1.5 px-4 py-2.5 rounded-xl border bg-white dark:bg-gray-800 focus:outline-none focus:ring-2 focus:ring-emerald-500";

/// Labelled input with its validation message underneath.
#[component]
pub fn TextField(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
) -> Element {
    let border = if error.is_some() {
        "border-red-400"
    } else {
        "border-gray-200 dark:border-gray-700"
    };

    rsx! {
        label {
            class: "block text-sm",
            span { class: "font-medium text-gray-700 dark:text-gray-300", "{label}" }
            input {
                class: "{INPUT} {border}",
                r#type: "{input_type}",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "mt-1 text-xs text-red-500", "{message}" }
            }
        }
    }
}

#[component]
pub fn TextArea(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = 3)] rows: u32,
) -> Element {
    rsx! {
        label {
            class: "block text-sm",
            span { class: "font-medium text-gray-700 dark:text-gray-300", "{label}" }
            textarea {
                class: "{INPUT} border-gray-200 dark:border-gray-700",
                rows: "{rows}",
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center gap-4 py-24 text-gray-500",
            div { class: "h-12 w-12 border-4 border-emerald-200 border-t-emerald-500 rounded-full animate-spin" }
            p { "{label}" }
        }
    }
}
