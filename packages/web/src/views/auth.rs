//! Sign-in and registration view.
//!
//! `mode=seller` opens the registration tab with the seller account type
//! preselected; `mode=registered` opens the sign-in tab with a confirmation.
//! `redirect` is the gated path that sent the visitor here, if any.

use std::time::Duration;

use api::AccountType;
use dioxus::prelude::*;
use store::post_login_destination;
use ui::forms::{FieldErrors, LoginForm, RegisterForm};
use ui::icons::FaLeaf;
use ui::{use_auth, Banner, Icon, NoticeLevel, TextField};

const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    SignIn,
    Register,
}

#[component]
pub fn Auth(redirect: String, mode: String) -> Element {
    let mut tab = use_signal(|| if mode == "seller" { Tab::Register } else { Tab::SignIn });
    let mut info = use_signal(|| {
        (mode == "registered").then(|| "Registration successful! Please sign in.".to_string())
    });
    let preset = if mode == "seller" {
        AccountType::Seller
    } else {
        AccountType::Customer
    };

    let on_registered = move |message: String| {
        info.set(Some(message));
        tab.set(Tab::SignIn);
    };

    let tab_class = |active: bool| {
        if active {
            "flex-1 py-2 rounded-lg bg-white dark:bg-gray-700 shadow font-semibold"
        } else {
            "flex-1 py-2 rounded-lg text-gray-500"
        }
    };

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center p-4 bg-emerald-50/50 dark:bg-gray-950",
            div {
                class: "w-full max-w-lg p-8 rounded-[2rem] bg-white dark:bg-gray-900 shadow-2xl",
                div {
                    class: "flex items-center gap-3 mb-8 text-emerald-700 dark:text-emerald-400",
                    Icon { icon: FaLeaf, width: 28, height: 28 }
                    h1 { class: "text-xl font-black tracking-tight", "ECOBAZAARX" }
                }
                div {
                    class: "flex gap-2 p-1 mb-6 rounded-xl bg-gray-100 dark:bg-gray-800",
                    button {
                        class: tab_class(tab() == Tab::SignIn),
                        onclick: move |_| tab.set(Tab::SignIn),
                        "Sign In"
                    }
                    button {
                        class: tab_class(tab() == Tab::Register),
                        onclick: move |_| tab.set(Tab::Register),
                        "Create Account"
                    }
                }
                if let Some(message) = info() {
                    Banner {
                        level: NoticeLevel::Success,
                        message,
                        on_dismiss: move |_| info.set(None),
                    }
                }
                {match tab() {
                    Tab::SignIn => rsx! { SignInForm { redirect: redirect.clone() } },
                    Tab::Register => rsx! { RegisterPanel { preset, on_registered } },
                }}
            }
        }
    }
}

#[component]
fn SignInForm(redirect: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut welcomed = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        let auth = auth.clone();
        let redirect = redirect.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            match auth.client().login(&request.username, &request.password).await {
                Ok((token, user)) => match auth.sign_in(&token, &user) {
                    Ok(()) => {
                        welcomed.set(true);
                        ui::sleep(LOGIN_REDIRECT_DELAY).await;
                        let return_to = Some(redirect.as_str()).filter(|r| !r.is_empty());
                        nav.replace(post_login_destination(user.role, return_to));
                    }
                    Err(e) => {
                        tracing::error!("Failed to persist session: {}", e);
                        error.set(Some("Could not save your session. Please try again.".to_string()));
                    }
                },
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(e.user_message("Login failed. Please check your credentials.")));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        if welcomed() {
            div {
                class: "welcome-overlay fixed inset-0 z-50 flex flex-col items-center justify-center bg-emerald-600/90 text-white text-center",
                h2 { class: "text-3xl font-black mb-2", "Welcome to EcoBazaarX" }
                p { class: "text-lg text-emerald-100", "You are now part of the green economy." }
            }
        }
        if let Some(message) = error() {
            Banner { level: NoticeLevel::Error, message }
        }
        form {
            class: "flex flex-col gap-4",
            onsubmit,
            TextField {
                label: "Username",
                value: form.read().username.clone(),
                oninput: move |v| form.write().username = v,
                error: errors.read().get("username").map(str::to_string),
            }
            TextField {
                label: "Password",
                input_type: "password",
                value: form.read().password.clone(),
                oninput: move |v| form.write().password = v,
                error: errors.read().get("password").map(str::to_string),
            }
            button {
                class: "mt-2 py-3 rounded-xl bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-bold",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign In" }
            }
        }
    }
}

#[component]
fn RegisterPanel(preset: AccountType, on_registered: EventHandler<String>) -> Element {
    let auth = use_auth();
    let mut form = use_signal(|| RegisterForm {
        account_type: preset,
        ..RegisterForm::default()
    });
    let mut errors = use_signal(FieldErrors::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        let client = auth.client();
        spawn(async move {
            loading.set(true);
            error.set(None);
            match client.register(&request).await {
                Ok(message) => {
                    tracing::info!("Registered {} as {:?}", request.username, request.role);
                    let message = if message.trim().is_empty() {
                        "Registration successful! Please sign in.".to_string()
                    } else {
                        message
                    };
                    on_registered.call(message);
                }
                Err(e) => error.set(Some(e.user_message("Registration failed. Please try again."))),
            }
            loading.set(false);
        });
    };

    let field_error = move |name: &str| errors.read().get(name).map(str::to_string);
    let account = form.read().account_type;
    let choice = |active: bool| {
        if active {
            "flex-1 py-2 rounded-lg border-2 border-emerald-500 text-emerald-700 dark:text-emerald-300 font-semibold"
        } else {
            "flex-1 py-2 rounded-lg border-2 border-gray-200 dark:border-gray-700 text-gray-500"
        }
    };

    rsx! {
        if let Some(message) = error() {
            Banner { level: NoticeLevel::Error, message }
        }
        form {
            class: "flex flex-col gap-4",
            onsubmit,
            div {
                class: "flex gap-3",
                button {
                    r#type: "button",
                    class: choice(account == AccountType::Customer),
                    onclick: move |_| form.write().account_type = AccountType::Customer,
                    "Customer"
                }
                button {
                    r#type: "button",
                    class: choice(account == AccountType::Seller),
                    onclick: move |_| form.write().account_type = AccountType::Seller,
                    "Seller"
                }
            }
            div {
                class: "grid grid-cols-2 gap-4",
                TextField {
                    label: "First name",
                    value: form.read().first_name.clone(),
                    oninput: move |v| form.write().first_name = v,
                    error: field_error("first_name"),
                }
                TextField {
                    label: "Last name",
                    value: form.read().last_name.clone(),
                    oninput: move |v| form.write().last_name = v,
                    error: field_error("last_name"),
                }
            }
            TextField {
                label: "Username",
                value: form.read().username.clone(),
                oninput: move |v| form.write().username = v,
                error: field_error("username"),
            }
            TextField {
                label: "Email",
                input_type: "email",
                value: form.read().email.clone(),
                oninput: move |v| form.write().email = v,
                error: field_error("email"),
            }
            TextField {
                label: "Password",
                input_type: "password",
                value: form.read().password.clone(),
                oninput: move |v| form.write().password = v,
                error: field_error("password"),
            }
            TextField {
                label: "Confirm password",
                input_type: "password",
                value: form.read().confirm_password.clone(),
                oninput: move |v| form.write().confirm_password = v,
                error: field_error("confirm_password"),
            }
            button {
                class: "mt-2 py-3 rounded-xl bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-bold",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Create Account" }
            }
        }
    }
}
