//! Toast stack rendered over every page.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;

use crate::state::notifications::{Notification, NotificationState};

/// CSS classes for one toast.
pub fn toast_class(notification: &Notification) -> String {
    format!("toast {}", notification.level.css_modifier())
}

#[component]
pub fn Toasts() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || notifications.get().items
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=toast_class(&n)>
                            <span class="toast__message">{n.message.clone()}</span>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| notifications.update(|state| state.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
