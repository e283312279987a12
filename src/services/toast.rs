//! Toast Notifications
//!
//! `Notifier` implementation backing the toast stack. Each toast removes
//! itself after `TOAST_DURATION_MS`.

use atelier_core::{NoticeLevel, Notifier};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

/// Reactive list of visible toasts
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn items(&self) -> ReadSignal<Vec<Toast>> {
        self.items.read_only()
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.items.update(|items| {
            items.push(Toast {
                id,
                level,
                message: message.into(),
            })
        });

        let toasts = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            toasts.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.items.update(|items| items.retain(|toast| toast.id != id));
    }
}

/// Store notifications shown as toasts
pub struct ToastNotifier {
    toasts: Toasts,
}

impl ToastNotifier {
    pub fn new(toasts: Toasts) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.toasts.push(level, message);
    }
}
