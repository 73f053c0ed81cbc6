//! Virtual try-on panel: pick a frame, add a photo, preview the overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signed-in customers get a try-on session row per attempt. The row starts
//! as `Started` and is marked `Completed` once face detection (simulated
//! with a fixed delay) finishes. Anonymous visitors can still preview
//! frames; nothing is recorded for them.

#[cfg(test)]
#[path = "try_on_test.rs"]
mod try_on_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::net::types::{Record, RecordId};
use crate::services::record::record_id;
use crate::state::notifications::{NoticeLevel, NotificationState, Notifier};
use crate::state::session::SessionState;

/// How long the simulated face detection takes.
pub const FACE_DETECTION_DELAY_MS: u32 = 2_000;

pub const SELECT_FRAMES_WARNING: &str = "Please select glasses to try on";
pub const SIGN_IN_TO_BUY_WARNING: &str = "Please sign in to add items to your cart";

fn field<'a>(record: &'a Record, name: &str) -> &'a str {
    record.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Customer whose try-on attempts are recorded, if any.
pub fn session_owner(authenticated: bool, customer: Option<&Record>) -> Option<RecordId> {
    if !authenticated {
        return None;
    }
    customer.and_then(record_id)
}

/// Owner of the session row to create; a photo is required to record one.
pub fn recording_owner(owner: Option<RecordId>, photo: &str) -> Option<RecordId> {
    owner.filter(|_| !photo.is_empty())
}

/// Image drawn over the customer's photo, falling back to the product shot.
pub fn frame_overlay(frame: &Record) -> &str {
    match field(frame, "overlay_image") {
        "" => field(frame, "image"),
        overlay => overlay,
    }
}

/// Toast shown for "Add to Cart".
pub fn add_to_cart_notice(authenticated: bool, frame_name: &str) -> (NoticeLevel, String) {
    if authenticated {
        (NoticeLevel::Success, format!("{frame_name} added to your cart!"))
    } else {
        (NoticeLevel::Warning, SIGN_IN_TO_BUY_WARNING.to_owned())
    }
}

#[component]
pub fn TryOn(frames: Vec<Record>, customer: Option<Record>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notifications = expect_context::<RwSignal<NotificationState>>();
    #[cfg(feature = "hydrate")]
    let config = expect_context::<RwSignal<Option<crate::net::types::ClientConfig>>>();

    let customer = StoredValue::new(customer);
    let selected = RwSignal::new(None::<Record>);
    let photo = RwSignal::new(String::new());
    let showing = RwSignal::new(false);
    let processing = RwSignal::new(false);
    let face_detected = RwSignal::new(false);

    let reset = move || {
        selected.set(None);
        photo.set(String::new());
        showing.set(false);
        processing.set(false);
        face_detected.set(false);
    };

    let on_start = move |_| {
        let Some(frame) = selected.get_untracked() else {
            notifications.warning(SELECT_FRAMES_WARNING);
            return;
        };
        let authenticated = session.with_untracked(SessionState::is_authenticated);
        let owner = customer.with_value(|c| session_owner(authenticated, c.as_ref()));
        let image = photo.get_untracked();
        showing.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use std::rc::Rc;

            use crate::net::records::{HostedRecordStore, RecordTransport};
            use crate::services::tables::TryOnSessionService;

            let sessions = config.get_untracked().map(|config| {
                let transport: Rc<dyn RecordTransport> = Rc::new(HostedRecordStore::new(config));
                let notifier: Rc<dyn Notifier> = Rc::new(notifications);
                TryOnSessionService::new(transport, notifier)
            });

            if let (Some(sessions), Some(owner)) = (&sessions, recording_owner(owner, &image)) {
                if let Some(row) = sessions.start(owner, &frame, &image).await {
                    log::debug!("try-on session saved: {:?}", record_id(&row));
                }
            }
            if image.is_empty() {
                return;
            }

            processing.set(true);
            gloo_timers::future::TimeoutFuture::new(FACE_DETECTION_DELAY_MS).await;
            processing.set(false);
            face_detected.set(true);

            if let (Some(sessions), Some(owner)) = (&sessions, owner) {
                sessions.complete_latest(owner).await;
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (frame, owner, image);
        }
    };

    let on_add_to_cart = move |_| {
        let authenticated = session.with_untracked(SessionState::is_authenticated);
        let name = selected.with_untracked(|f| f.as_ref().map(|f| field(f, "Name").to_owned())).unwrap_or_default();
        let (level, message) = add_to_cart_notice(authenticated, &name);
        Notifier::notify(&notifications, level, &message);
        if level == NoticeLevel::Success {
            reset();
        }
    };

    let overlay = move || selected.with(|f| f.as_ref().map(|f| frame_overlay(f).to_owned()).unwrap_or_default());

    view! {
        <section class="try-on">
            <h2>"Virtual Try-On"</h2>
            <p>"See how different frames look on your face without leaving home."</p>
            <label>
                "Photo URL "
                <input
                    type="url"
                    placeholder="https://..."
                    prop:value=move || photo.get()
                    on:input=move |ev| photo.set(event_target_value(&ev))
                />
            </label>
            <div class="try-on__frames">
                {frames
                    .into_iter()
                    .map(|frame| {
                        let id = record_id(&frame);
                        let name = field(&frame, "Name").to_owned();
                        let image = field(&frame, "image").to_owned();
                        view! {
                            <button
                                class="try-on__frame"
                                class:try-on__frame--selected=move || {
                                    id.is_some() && selected.with(|s| s.as_ref().and_then(record_id) == id)
                                }
                                on:click=move |_| selected.set(Some(frame.clone()))
                            >
                                <img src=image alt=name.clone()/>
                                <span>{name}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button class="btn-primary" on:click=on_start>"Start Try-On"</button>
            <div class="try-on__stage" hidden=move || !showing.get()>
                <img src=move || photo.get() alt="Your photo"/>
                <img class="try-on__overlay" src=overlay alt="" hidden=move || !face_detected.get()/>
                <p hidden=move || !processing.get()>"Detecting face..."</p>
                <button class="btn-primary" on:click=on_add_to_cart>"Add to Cart"</button>
                <button class="btn-secondary" on:click=move |_| reset()>"Try Again"</button>
            </div>
        </section>
    }
}
