//! Cart count context and navbar badge.

use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use store::{CartLine, CartSnapshot, CartSynchronizer, StoreError};

use crate::icons::FaCartShopping;
use crate::storage::{make_local_store, AppStore};
use crate::Icon;

/// The persisted cart plus the item count derived from it.
#[derive(Clone)]
pub struct CartContext {
    count: SyncSignal<u32>,
    sync: CartSynchronizer<AppStore>,
}

impl CartContext {
    pub fn count(&self) -> u32 {
        *self.count.read()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.sync.load()
    }

    /// Emit the "cart changed" signal after a server-confirmed change.
    pub fn notify_changed(&self) {
        self.sync.notify_changed();
    }

    pub fn add_line(&self, line: CartLine) -> Result<CartSnapshot, StoreError> {
        self.sync.add_line(line)
    }

    pub fn remove_cart_row(&self, cart_id: i64) -> Result<CartSnapshot, StoreError> {
        self.sync.remove_cart_row(cart_id)
    }

    pub fn swap_line(&self, current: &CartLine, replacement: CartLine) -> Result<CartSnapshot, StoreError> {
        self.sync.swap_line(current, replacement)
    }

    pub fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<CartSnapshot, StoreError> {
        self.sync.set_quantity(product_id, quantity)
    }

    pub fn replace(&self, lines: Vec<CartLine>) -> Result<CartSnapshot, StoreError> {
        self.sync.replace(lines)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.sync.clear()
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>()
}

#[component]
pub fn CartProvider(children: Element) -> Element {
    let sync = use_hook(|| CartSynchronizer::new(make_local_store()));
    let count = use_signal_sync({
        let sync = sync.clone();
        move || sync.count()
    });

    use_hook({
        let sync = sync.clone();
        move || {
            let on_count = sync.subscribe(Arc::new(move |n: u32| {
                let mut count = count;
                count.set(n);
            }));
            let external = sync.watch_external();
            Rc::new((on_count, external))
        }
    });

    use_context_provider(move || CartContext { count, sync });

    rsx! {
        {children}
    }
}

/// Cart icon with the live item count.
#[component]
pub fn CartBadge(#[props(default = "".to_string())] class: String) -> Element {
    let cart = use_cart();
    let count = cart.count();

    rsx! {
        span {
            class: "relative inline-flex items-center {class}",
            title: "Cart",
            Icon { icon: FaCartShopping, width: 18, height: 18 }
            if count > 0 {
                span {
                    class: "absolute -top-2 -right-3 min-w-[1.25rem] h-5 px-1 rounded-full bg-emerald-600 text-white text-xs font-bold flex items-center justify-center",
                    "{count}"
                }
            }
        }
    }
}
