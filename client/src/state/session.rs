//! Session state for the current browser visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the session bootstrap and sign-out (`util::auth`); read by
//! the app shell, the header and pages that need the visitor's identity.
//!
//! DESIGN
//! ======
//! `BootstrapPhase` gates routed content: nothing but the placeholder renders
//! until the identity provider has answered once.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::net::identity::IdentityError;
use crate::net::types::Identity;
use crate::util::redirect::{NavigationIntent, ResolvedRoute, resolve_route};

/// Whether the identity provider has answered yet. `Initialized` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootstrapPhase {
    #[default]
    Uninitialized,
    Initialized,
}

/// Authentication status of the visitor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub authenticated: bool,
    pub identity: Option<Identity>,
}

impl Session {
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self { authenticated: true, identity: Some(identity) }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Session plus bootstrap phase, provided to the app via context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub phase: BootstrapPhase,
    pub session: Session,
}

impl SessionState {
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.phase == BootstrapPhase::Initialized
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Record the identity provider's setup outcome and return the route to
    /// navigate to.
    ///
    /// A provider error is logged and leaves the state untouched; no route is
    /// produced and the phase stays as it was. `Initialized` is terminal:
    /// once set, later outcomes are ignored.
    pub fn complete_setup(
        &mut self,
        outcome: Result<Option<Identity>, IdentityError>,
        intent: &NavigationIntent,
    ) -> Option<ResolvedRoute> {
        if self.is_initialized() {
            log::debug!("setup already completed, ignoring later outcome");
            return None;
        }
        let identity = match outcome {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("Authentication failed: {e}");
                return None;
            }
        };
        let route = resolve_route(identity.is_some(), intent);
        self.phase = BootstrapPhase::Initialized;
        self.session = identity.map_or_else(Session::signed_out, Session::signed_in);
        log::debug!("session initialized, navigating to {route}");
        Some(route)
    }

    /// Drop the identity after an explicit sign-out.
    pub fn sign_out(&mut self) {
        self.session = Session::signed_out();
    }
}

/// Single-writer handle on the session state.
pub trait SessionStore {
    fn snapshot(&self) -> SessionState;
    fn replace(&self, state: SessionState);
}

impl SessionStore for RwSignal<SessionState> {
    fn snapshot(&self) -> SessionState {
        self.get_untracked()
    }

    fn replace(&self, state: SessionState) {
        self.set(state);
    }
}
