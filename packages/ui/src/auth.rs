//! Authentication context and hooks for the UI.

use std::rc::Rc;
use std::sync::Arc;

use api::{ApiClient, ClientConfig};
use dioxus::prelude::*;
use store::{keys, AuthState, ChangeOrigin, KeyValueStore, SessionResolver, StorageEvent, StoreError, StoredUser};

use crate::cart::use_cart;
use crate::storage::{make_local_store, make_session_store, AppStore};

/// Session state shared through context.
///
/// The state lives in a sync signal so storage listeners, which must be
/// `Send + Sync`, can write to it.
#[derive(Clone)]
pub struct AuthContext {
    state: SyncSignal<AuthState>,
    resolver: SessionResolver<AppStore>,
    client: ApiClient,
}

impl AuthContext {
    /// Current state. Reading it subscribes the calling component.
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    pub fn user(&self) -> Option<StoredUser> {
        self.state.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Backend client carrying the current session token.
    pub fn client(&self) -> ApiClient {
        let token = self.state.peek().token().map(str::to_string);
        self.client.clone().with_token(token)
    }

    pub fn sign_in(&self, token: &str, user: &StoredUser) -> Result<(), StoreError> {
        let next = self.resolver.sign_in(token, user)?;
        let mut state = self.state;
        state.set(next);
        Ok(())
    }

    pub fn sign_out(&self) {
        let mut state = self.state;
        state.set(self.resolver.sign_out());
    }

    pub fn refresh(&self) {
        let next = self.resolver.refresh();
        if *self.state.peek() != next {
            let mut state = self.state;
            state.set(next);
        }
    }
}

/// Get the authentication context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that resolves the persisted session and keeps it in
/// sync with other tabs. Wrap the router with it.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let resolver = use_hook(|| SessionResolver::new(make_local_store(), make_session_store()));
    let state = use_signal_sync({
        let resolver = resolver.clone();
        move || resolver.resolve_startup()
    });

    use_context_provider({
        let config = config.clone();
        move || config
    });
    use_context_provider({
        let resolver = resolver.clone();
        move || AuthContext {
            state,
            resolver,
            client: ApiClient::new(&config),
        }
    });

    // Another tab signed in or out.
    use_hook(move || {
        let watcher = resolver.clone();
        let subscription = resolver.persistent().subscribe(Arc::new(move |e: &StorageEvent| {
            if e.origin == ChangeOrigin::External && (e.touches(keys::TOKEN) || e.touches(keys::USER)) {
                tracing::debug!("Session changed in another tab");
                let next = watcher.refresh();
                let mut state = state;
                if *state.peek() != next {
                    state.set(next);
                }
            }
        }));
        Rc::new(subscription)
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default = "/".to_string())] redirect_to: String,
) -> Element {
    let auth = use_auth();
    let cart = use_cart();
    let nav = use_navigator();

    let onclick = move |_| {
        auth.sign_out();
        cart.notify_changed();
        nav.replace(redirect_to.clone());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
