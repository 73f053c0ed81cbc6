//! Sign-in flow pages: login, signup, callback and error.
//!
//! SYSTEM CONTEXT
//! ==============
//! These routes are where the hosted identity UI lives. Each exposes the
//! `#authentication` mount node the provider renders into, plus a plain
//! link to the hosted page that carries the pending `redirect` along.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::net::api::hosted_auth_url;
use crate::net::identity::AUTH_MOUNT_ID;
use crate::net::types::ClientConfig;

const FALLBACK_ERROR: &str = "Something went wrong while signing you in.";

/// Message shown on the error page for the `message` query value.
pub fn error_message(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_ERROR)
        .to_owned()
}

/// Heading and link text for a hosted auth view.
pub fn auth_copy(mode: &str) -> (&'static str, &'static str) {
    match mode {
        "signup" => ("Create your account", "Continue to sign up"),
        _ => ("Welcome back", "Continue to sign in"),
    }
}

#[component]
fn AuthPanel(mode: &'static str) -> impl IntoView {
    let config = expect_context::<RwSignal<Option<ClientConfig>>>();
    let query = use_query_map();
    let (heading, link_text) = auth_copy(mode);

    let href = move || {
        let redirect = query.with(|q| q.get("redirect"));
        config.with(|c| c.as_ref().map(|c| hosted_auth_url(c, mode, redirect.as_deref())))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{heading}</h1>
                <div id=AUTH_MOUNT_ID></div>
                <a class="btn-primary" href=move || href().unwrap_or_default()>{link_text}</a>
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <AuthPanel mode="login"/> }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! { <AuthPanel mode="signup"/> }
}

/// Landing route after the hosted provider hands control back.
#[component]
pub fn CallbackPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <p>"Completing sign-in..."</p>
                <div id=AUTH_MOUNT_ID></div>
            </div>
        </div>
    }
}

#[component]
pub fn ErrorPage() -> impl IntoView {
    let query = use_query_map();
    let message = move || query.with(|q| error_message(q.get("message").as_deref()));

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--error">
                <h1>"Authentication Error"</h1>
                <p>{message}</p>
                <div id=AUTH_MOUNT_ID></div>
                <a class="btn-primary" href="/login">"Back to sign in"</a>
            </div>
        </div>
    }
}
