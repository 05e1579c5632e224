use dioxus::prelude::*;
use ui::icons::{FaEnvelope, FaLeaf, FaLocationDot, FaPhone, FaStar, FaUser};
use ui::{use_auth, Banner, Icon, LogoutButton, NoticeLevel, Spinner};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let user = auth.user();

    let profile = use_resource({
        let auth = auth.clone();
        move || {
            let client = auth.client();
            let user = auth.user();
            async move {
                match user {
                    Some(user) => client
                        .customer_profile(user.user_id)
                        .await
                        .map_err(|e| e.user_message("Failed to load profile.")),
                    None => Err("You are not signed in.".to_string()),
                }
            }
        }
    });

    let Some(result) = profile.read().clone() else {
        return rsx! { Spinner { label: "Loading profile..." } };
    };

    let username = user.as_ref().map(|u| u.username.clone()).unwrap_or_default();
    let role = user.as_ref().map(|u| u.role.as_str()).unwrap_or_default();

    rsx! {
        div {
            class: "max-w-3xl mx-auto px-4 py-16",
            {match result {
                Err(message) => rsx! {
                    Banner { level: NoticeLevel::Error, message }
                },
                Ok(profile) => rsx! {
                    div {
                        class: "rounded-3xl overflow-hidden border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800",
                        div {
                            class: "px-8 py-10 bg-gradient-to-r from-emerald-600 to-teal-600 text-white",
                            div {
                                class: "flex items-center gap-4",
                                span {
                                    class: "w-16 h-16 rounded-full bg-white/20 flex items-center justify-center",
                                    Icon { icon: FaUser, width: 28, height: 28 }
                                }
                                div {
                                    h1 { class: "text-2xl font-bold", "{profile.display_name()}" }
                                    p { class: "text-emerald-100 text-sm", "@{username} · {role}" }
                                }
                            }
                        }
                        div {
                            class: "grid sm:grid-cols-2 gap-6 p-8",
                            ProfileRow { icon: "email", label: "Email", value: profile.email_label() }
                            ProfileRow { icon: "phone", label: "Phone", value: profile.phone_label() }
                            div {
                                class: "sm:col-span-2",
                                ProfileRow { icon: "address", label: "Address", value: profile.format_address() }
                            }
                        }
                        div {
                            class: "grid grid-cols-2 gap-6 px-8 pb-8",
                            div {
                                class: "p-5 rounded-2xl bg-emerald-50 dark:bg-emerald-900/20",
                                span { class: "text-emerald-600", Icon { icon: FaLeaf, width: 18, height: 18 } }
                                p { class: "text-2xl font-black mt-2", "{profile.carbon_saved.unwrap_or_default():.2} kg" }
                                p { class: "text-sm text-gray-500", "Carbon saved" }
                            }
                            div {
                                class: "p-5 rounded-2xl bg-blue-50 dark:bg-blue-900/20",
                                span { class: "text-blue-600", Icon { icon: FaStar, width: 18, height: 18 } }
                                p { class: "text-2xl font-black mt-2", "{profile.eco_points.unwrap_or_default()}" }
                                p { class: "text-sm text-gray-500", "Eco points" }
                            }
                        }
                    }
                },
            }}
            div {
                class: "flex justify-between items-center mt-8",
                Link { to: Route::Orders {}, class: "text-emerald-600 font-semibold", "View my orders" }
                LogoutButton { class: "px-6 py-2 rounded-full border-2 border-red-500 text-red-600 font-semibold hover:bg-red-50" }
            }
        }
    }
}

#[component]
fn ProfileRow(icon: &'static str, label: &'static str, value: String) -> Element {
    let glyph = match icon {
        "email" => rsx! { Icon { icon: FaEnvelope, width: 14, height: 14 } },
        "phone" => rsx! { Icon { icon: FaPhone, width: 14, height: 14 } },
        _ => rsx! { Icon { icon: FaLocationDot, width: 14, height: 14 } },
    };

    rsx! {
        div {
            p { class: "flex items-center gap-2 text-xs uppercase tracking-wide text-gray-500", {glyph} "{label}" }
            p { class: "mt-1 font-medium whitespace-pre-line", "{value}" }
        }
    }
}
