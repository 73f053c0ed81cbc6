//! Session bootstrap and sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per page load: asks the identity provider who the visitor is,
//! records the answer in the session store and performs exactly one
//! navigation. Sign-out is the only other writer of the session.
//!
//! KNOWN ISSUES
//! ============
//! There is no timeout or retry. If the provider never answers, or answers
//! with an error, the phase stays `Uninitialized` and the app keeps showing
//! the placeholder.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos_router::NavigateOptions;

use crate::net::identity::{IdentityError, IdentityProvider, SetupOptions};
use crate::state::session::{BootstrapPhase, SessionStore};
use crate::util::redirect::{NavigationIntent, ResolvedRoute};

/// Route the app lands on after signing out.
pub const SIGNED_OUT_ROUTE: &str = "/login";

/// Browser location: read where we are, navigate somewhere else.
pub trait Navigator {
    fn current_intent(&self) -> NavigationIntent;
    fn navigate(&self, route: &ResolvedRoute);
}

/// [`Navigator`] over the router's `navigate` function and `window.location`.
#[derive(Clone)]
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn current_intent(&self) -> NavigationIntent {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let location = window.location();
                let pathname = location.pathname().unwrap_or_else(|_| "/".to_owned());
                let search = location.search().unwrap_or_default();
                return NavigationIntent::from_location(&pathname, &search);
            }
        }
        NavigationIntent::from_location("/", "")
    }

    fn navigate(&self, route: &ResolvedRoute) {
        (self.navigate)(route.as_str(), NavigateOptions::default());
    }
}

/// Run identity setup and apply its outcome.
///
/// On success the session store is written once and exactly one navigation
/// happens. On a provider error nothing changes. Returns the phase after
/// the outcome has been applied.
pub async fn bootstrap_session(
    provider: &dyn IdentityProvider,
    options: &SetupOptions,
    navigator: &dyn Navigator,
    store: &dyn SessionStore,
) -> BootstrapPhase {
    let outcome = provider.setup(options).await;
    let intent = navigator.current_intent();
    let mut state = store.snapshot();
    if let Some(route) = state.complete_setup(outcome, &intent) {
        let phase = state.phase;
        store.replace(state);
        navigator.navigate(&route);
        return phase;
    }
    state.phase
}

/// Sign out with the provider, clear the session and go to `/login`.
///
/// # Errors
///
/// Returns the provider's error after logging it; the session is left
/// untouched and no navigation happens.
pub async fn sign_out(
    provider: &dyn IdentityProvider,
    navigator: &dyn Navigator,
    store: &dyn SessionStore,
) -> Result<(), IdentityError> {
    if let Err(e) = provider.logout().await {
        log::error!("Logout failed: {e}");
        return Err(e);
    }
    let mut state = store.snapshot();
    state.sign_out();
    store.replace(state);
    navigator.navigate(&ResolvedRoute::new(SIGNED_OUT_ROUTE));
    Ok(())
}
