//! Transient toast notifications.
//!
//! DESIGN
//! ======
//! Services report outcomes through the [`Notifier`] trait so they never
//! depend on Leptos directly; the app implements it on the reactive queue.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;

/// How long a toast stays on screen before it dismisses itself.
pub const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of visible toasts, newest first.
#[derive(Clone, Debug, Default)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    next_id: u64,
}

impl NotificationState {
    /// Add a toast and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.insert(0, Notification { id, level, message: message.to_owned() });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}

/// Sink for user-facing messages.
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

impl Notifier for RwSignal<NotificationState> {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let mut id = 0;
        self.update(|state| id = state.push(level, message));

        #[cfg(feature = "hydrate")]
        {
            let queue = *self;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
                queue.update(|state| state.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}
