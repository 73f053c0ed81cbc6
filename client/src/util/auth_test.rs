use std::cell::{Cell, RefCell};

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::types::{ClientConfig, Identity};
use crate::state::session::{Session, SessionState};

// =============================================================
// Test doubles
// =============================================================

struct ScriptedProvider {
    setup: Result<Option<Identity>, IdentityError>,
    logout: Result<(), IdentityError>,
    setup_calls: Cell<usize>,
}

impl ScriptedProvider {
    fn new(setup: Result<Option<Identity>, IdentityError>) -> Self {
        Self { setup, logout: Ok(()), setup_calls: Cell::new(0) }
    }

    fn failing_logout(error: IdentityError) -> Self {
        Self { setup: Ok(None), logout: Err(error), setup_calls: Cell::new(0) }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for ScriptedProvider {
    async fn setup(&self, _options: &SetupOptions) -> Result<Option<Identity>, IdentityError> {
        self.setup_calls.set(self.setup_calls.get() + 1);
        self.setup.clone()
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        self.logout.clone()
    }
}

struct RecordingNavigator {
    intent: NavigationIntent,
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    fn at(pathname: &str, search: &str) -> Self {
        Self { intent: NavigationIntent::from_location(pathname, search), visited: RefCell::new(Vec::new()) }
    }

    fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_intent(&self) -> NavigationIntent {
        self.intent.clone()
    }

    fn navigate(&self, route: &ResolvedRoute) {
        self.visited.borrow_mut().push(route.as_str().to_owned());
    }
}

#[derive(Default)]
struct CellStore {
    state: RefCell<SessionState>,
    writes: Cell<usize>,
}

impl SessionStore for CellStore {
    fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn replace(&self, state: SessionState) {
        self.writes.set(self.writes.get() + 1);
        *self.state.borrow_mut() = state;
    }
}

fn options() -> SetupOptions {
    SetupOptions::from_config(&ClientConfig {
        project_id: "proj".into(),
        public_key: "pk".into(),
        auth_url: "https://auth.example.test".into(),
        api_url: "https://api.example.test".into(),
    })
}

fn identity() -> Identity {
    Identity::new(json!({ "emailAddress": "ada@example.com" }))
}

// =============================================================
// bootstrap_session
// =============================================================

#[test]
fn bootstrap_signed_in_navigates_once_and_stores_identity() {
    let provider = ScriptedProvider::new(Ok(Some(identity())));
    let navigator = RecordingNavigator::at("/login", "?redirect=/cart");
    let store = CellStore::default();

    let phase = block_on(bootstrap_session(&provider, &options(), &navigator, &store));

    assert_eq!(phase, BootstrapPhase::Initialized);
    assert_eq!(navigator.visited(), vec!["/cart".to_owned()]);
    assert_eq!(store.writes.get(), 1);
    assert_eq!(store.snapshot().session, Session::signed_in(identity()));
    assert_eq!(provider.setup_calls.get(), 1);
}

#[test]
fn bootstrap_anonymous_on_product_page_goes_to_login() {
    let provider = ScriptedProvider::new(Ok(None));
    let navigator = RecordingNavigator::at("/products/3", "");
    let store = CellStore::default();

    let phase = block_on(bootstrap_session(&provider, &options(), &navigator, &store));

    assert_eq!(phase, BootstrapPhase::Initialized);
    assert_eq!(navigator.visited(), vec!["/login".to_owned()]);
    assert_eq!(store.writes.get(), 1);
    assert!(!store.snapshot().is_authenticated());
}

#[test]
fn bootstrap_anonymous_on_signup_stays_put() {
    let provider = ScriptedProvider::new(Ok(None));
    let navigator = RecordingNavigator::at("/signup", "?redirect=/try-on");
    let store = CellStore::default();

    block_on(bootstrap_session(&provider, &options(), &navigator, &store));

    assert_eq!(navigator.visited(), vec!["/signup?redirect=/try-on".to_owned()]);
}

#[test]
fn bootstrap_error_neither_navigates_nor_writes() {
    let provider = ScriptedProvider::new(Err(IdentityError::Request("offline".into())));
    let navigator = RecordingNavigator::at("/", "");
    let store = CellStore::default();

    let phase = block_on(bootstrap_session(&provider, &options(), &navigator, &store));

    assert_eq!(phase, BootstrapPhase::Uninitialized);
    assert!(navigator.visited().is_empty());
    assert_eq!(store.writes.get(), 0);
    assert_eq!(store.snapshot(), SessionState::default());
}

#[test]
fn second_bootstrap_neither_navigates_nor_writes() {
    let navigator = RecordingNavigator::at("/cart", "");
    let store = CellStore::default();

    block_on(bootstrap_session(&ScriptedProvider::new(Ok(None)), &options(), &navigator, &store));
    let phase = block_on(bootstrap_session(&ScriptedProvider::new(Ok(Some(identity()))), &options(), &navigator, &store));

    assert_eq!(phase, BootstrapPhase::Initialized);
    assert_eq!(navigator.visited(), vec!["/login".to_owned()]);
    assert_eq!(store.writes.get(), 1);
    assert!(!store.snapshot().is_authenticated());
}

// =============================================================
// sign_out
// =============================================================

#[test]
fn sign_out_clears_session_and_goes_to_login() {
    let provider = ScriptedProvider::new(Ok(None));
    let navigator = RecordingNavigator::at("/", "");
    let store = CellStore::default();
    store.replace(SessionState { phase: BootstrapPhase::Initialized, session: Session::signed_in(identity()) });

    let result = block_on(sign_out(&provider, &navigator, &store));

    assert_eq!(result, Ok(()));
    assert_eq!(navigator.visited(), vec!["/login".to_owned()]);
    let state = store.snapshot();
    assert!(state.is_initialized());
    assert!(!state.is_authenticated());
}

#[test]
fn sign_out_failure_keeps_session() {
    let provider = ScriptedProvider::failing_logout(IdentityError::Status(503));
    let navigator = RecordingNavigator::at("/", "");
    let store = CellStore::default();
    let signed_in = SessionState { phase: BootstrapPhase::Initialized, session: Session::signed_in(identity()) };
    store.replace(signed_in.clone());

    let result = block_on(sign_out(&provider, &navigator, &store));

    assert_eq!(result, Err(IdentityError::Status(503)));
    assert!(navigator.visited().is_empty());
    assert_eq!(store.snapshot(), signed_in);
    assert_eq!(store.writes.get(), 1);
}

// =============================================================
// RouterNavigator
// =============================================================

#[test]
fn router_navigator_forwards_route() {
    let seen = RefCell::new(Vec::new());
    let navigator = RouterNavigator::new(|path: &str, _opts: NavigateOptions| seen.borrow_mut().push(path.to_owned()));
    navigator.navigate(&ResolvedRoute::new("/signup?redirect=/cart"));
    assert_eq!(*seen.borrow(), vec!["/signup?redirect=/cart".to_owned()]);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn router_navigator_reads_root_off_browser() {
    let navigator = RouterNavigator::new(|_: &str, _: NavigateOptions| {});
    assert_eq!(navigator.current_intent(), NavigationIntent::from_location("/", ""));
}
