//! Storefront header with theme toggle and sign-in/sign-out control.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hidden on auth pages so the hosted sign-in UI has the screen to itself.
//! Logout goes through `util::auth::sign_out`, the only writer of the
//! session besides bootstrap.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::session::SessionState;
use crate::util::redirect::is_auth_path;
use crate::util::theme::Theme;

/// Whether the header renders on `path`.
pub fn header_visible(path: &str) -> bool {
    !is_auth_path(path)
}

/// Accessible label of the theme toggle button.
pub fn theme_toggle_label(theme: Theme) -> &'static str {
    if theme.is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
}

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let theme = expect_context::<RwSignal<Theme>>();
    let location = use_location();

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "hydrate")]
    let config = expect_context::<RwSignal<Option<crate::net::types::ClientConfig>>>();

    let on_toggle_theme = move |_| {
        theme.update(|t| *t = crate::util::theme::toggle(*t));
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::net::identity::HostedIdentityProvider;
            use crate::util::auth::{RouterNavigator, sign_out};

            let Some(config) = config.get_untracked() else {
                log::warn!("logout requested before client config loaded");
                return;
            };
            let navigator = RouterNavigator::new(navigate.clone());
            leptos::task::spawn_local(async move {
                let provider = HostedIdentityProvider::new(config);
                // A failed logout leaves the visitor signed in; sign_out logs it.
                if sign_out(&provider, &navigator, &session).await.is_err() {
                    log::debug!("logout failed, staying on current page");
                }
            });
        }
    };

    let authenticated = move || session.with(SessionState::is_authenticated);

    view! {
        <header class="site-header" hidden=move || !location.pathname.with(|p| header_visible(p))>
            <a href="/" class="site-header__brand">"OpticalHub"</a>
            <nav class="site-header__nav">
                <a href="#">"Eyeglasses"</a>
                <a href="#">"Sunglasses"</a>
                <a href="#">"Contact Lenses"</a>
                <a href="#">"Virtual Try-On"</a>
            </nav>
            <div class="site-header__actions">
                <button
                    class="site-header__icon"
                    aria-label=move || theme_toggle_label(theme.get())
                    on:click=on_toggle_theme
                >
                    {move || if theme.get().is_dark() { "☀" } else { "☾" }}
                </button>
                <a href="/login" class="btn-primary" hidden=authenticated>"Sign In"</a>
                <button class="btn-secondary" hidden=move || !authenticated() on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </header>
    }
}
