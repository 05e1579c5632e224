//! Inline banners and the transient notice tray.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn classes(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "bg-blue-50 border-blue-200 text-blue-700 dark:bg-blue-900/20 dark:border-blue-800 dark:text-blue-300",
            NoticeLevel::Success => "bg-emerald-50 border-emerald-200 text-emerald-700 dark:bg-emerald-900/20 dark:border-emerald-800 dark:text-emerald-300",
            NoticeLevel::Warning => "bg-amber-50 border-amber-200 text-amber-700 dark:bg-amber-900/20 dark:border-amber-800 dark:text-amber-300",
            NoticeLevel::Error => "bg-red-50 border-red-200 text-red-700 dark:bg-red-900/20 dark:border-red-800 dark:text-red-300",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

/// Messages that outlive the view that raised them (e.g. "Added to cart").
#[derive(Clone, Debug, Default)]
pub struct NoticeBoard {
    pub entries: Vec<Notice>,
    next_id: u64,
}

/// Entries kept before the oldest is dropped.
const MAX_NOTICES: usize = 4;

pub fn use_notices() -> Signal<NoticeBoard> {
    use_context::<Signal<NoticeBoard>>()
}

impl NoticeBoard {
    pub fn push(&mut self, level: NoticeLevel, message: &str, timestamp: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            timestamp,
            level,
            message: message.to_string(),
        });
        let overflow = self.entries.len().saturating_sub(MAX_NOTICES);
        self.entries.drain(..overflow);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn push_notice(board: &mut Signal<NoticeBoard>, level: NoticeLevel, message: &str) {
    board.write().push(level, message, current_time());
}

pub fn dismiss_notice(board: &mut Signal<NoticeBoard>, id: u64) {
    board.write().dismiss(id);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    format!("{h:02}:{m:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00".to_string()
}

/// Inline message box for a view's own load/submit failures.
#[component]
pub fn Banner(
    level: NoticeLevel,
    message: String,
    #[props(default)] on_dismiss: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div {
            class: "flex items-start justify-between gap-3 mb-6 p-4 border rounded-lg text-sm {level.classes()}",
            role: "alert",
            p { "{message}" }
            if let Some(handler) = on_dismiss {
                button {
                    class: "font-bold opacity-60 hover:opacity-100",
                    onclick: move |_| handler.call(()),
                    "×"
                }
            }
        }
    }
}

#[component]
pub fn NoticeProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(NoticeBoard::default()));
    rsx! {
        {children}
        NoticeTray {}
    }
}

/// Bottom-centre stack of the most recent notices.
#[component]
fn NoticeTray() -> Element {
    let mut board = use_notices();
    let entries = board().entries;

    rsx! {
        div {
            class: "fixed bottom-4 left-1/2 -translate-x-1/2 z-50 flex flex-col gap-2 w-[min(28rem,90vw)]",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: "flex items-center justify-between gap-3 px-4 py-3 border rounded-lg shadow-lg text-sm {notice.level.classes()}",
                    span { class: "text-xs opacity-60 font-mono", "{notice.timestamp}" }
                    span { class: "flex-1", "{notice.message}" }
                    button {
                        class: "font-bold opacity-60 hover:opacity-100",
                        onclick: move |_| dismiss_notice(&mut board, notice.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_keeps_most_recent() {
        let mut board = NoticeBoard::default();
        for i in 0..6 {
            board.push(NoticeLevel::Info, &format!("n{i}"), "10:00".to_string());
        }
        let messages: Vec<&str> = board.entries.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4", "n5"]);

        let first = board.entries[0].id;
        board.dismiss(first);
        assert_eq!(board.entries.len(), 3);
        assert!(board.entries.iter().all(|n| n.id != first));
    }
}
