//! Post-authentication redirect resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per page load, right after the identity provider reports
//! whether the visitor is signed in. Produces the single route the app
//! navigates to.
//!
//! KNOWN ISSUES
//! ============
//! - The signed-in `redirect` target is followed verbatim, with no origin or
//!   allow-list check (open redirect).
//! - Several arms below can never be taken under their guards. They are
//!   kept so the decision table stays line-for-line comparable with the
//!   deployed behavior.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::collections::BTreeMap;
use std::fmt;

/// Route prefixes that host the sign-in flow.
pub const AUTH_ROUTES: [&str; 4] = ["/login", "/signup", "/callback", "/error"];

/// Substrings that mark a location as part of the sign-in flow when deciding
/// whether to wrap a pending redirect.
const AUTH_MARKERS: [&str; 4] = ["error", "signup", "login", "callback"];

/// True if `path` contains any auth route.
#[must_use]
pub fn is_auth_path(path: &str) -> bool {
    AUTH_ROUTES.iter().any(|route| path.contains(route))
}

/// Where the visitor currently is and where they asked to go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Pathname followed by the raw search string, e.g. `/callback?redirect=/cart`.
    pub current_path: String,
    pub current_query: BTreeMap<String, String>,
    /// The `redirect` query value. Empty values count as absent.
    pub requested_redirect: Option<String>,
}

impl NavigationIntent {
    /// Build an intent from `location.pathname` and `location.search`.
    #[must_use]
    pub fn from_location(pathname: &str, search: &str) -> Self {
        let mut current_query = BTreeMap::new();
        let raw = search.strip_prefix('?').unwrap_or(search);
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            current_query.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        let requested_redirect = current_query.get("redirect").filter(|r| !r.is_empty()).cloned();
        Self { current_path: format!("{pathname}{search}"), current_query, requested_redirect }
    }

    /// Build an intent directly from a location string and redirect target.
    #[must_use]
    pub fn new(current_path: &str, requested_redirect: Option<&str>) -> Self {
        let requested_redirect = requested_redirect.filter(|r| !r.is_empty()).map(str::to_owned);
        let mut current_query = BTreeMap::new();
        if let Some(redirect) = &requested_redirect {
            current_query.insert("redirect".to_owned(), redirect.clone());
        }
        Self { current_path: current_path.to_owned(), current_query, requested_redirect }
    }

    #[must_use]
    pub fn is_auth_page(&self) -> bool {
        is_auth_path(&self.current_path)
    }

    fn carries_auth_marker(&self) -> bool {
        AUTH_MARKERS.iter().any(|marker| self.current_path.contains(marker))
    }
}

/// The one navigation target produced per identity outcome.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedRoute(String);

impl ResolvedRoute {
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the navigation target for a signed-in (`authenticated`) or
/// anonymous visitor. Pure: the same inputs always give the same route.
#[must_use]
pub fn resolve_route(authenticated: bool, intent: &NavigationIntent) -> ResolvedRoute {
    if authenticated {
        resolve_signed_in(intent)
    } else {
        resolve_anonymous(intent)
    }
}

fn resolve_signed_in(intent: &NavigationIntent) -> ResolvedRoute {
    let path = intent.current_path.as_str();
    if let Some(redirect) = &intent.requested_redirect {
        return ResolvedRoute::new(redirect.as_str());
    }
    if !intent.is_auth_page() {
        // The else arm is unreachable: non-auth paths never contain these.
        if !path.contains("/login") && !path.contains("/signup") {
            return ResolvedRoute::new(path);
        }
        return ResolvedRoute::new("/");
    }
    ResolvedRoute::new("/")
}

fn resolve_anonymous(intent: &NavigationIntent) -> ResolvedRoute {
    let path = intent.current_path.as_str();
    if !intent.is_auth_page() {
        // Both wrapped arms are unreachable: the guard excludes them.
        let route = if path.contains("/signup") {
            format!("/signup?redirect={path}")
        } else if path.contains("/login") {
            format!("/login?redirect={path}")
        } else {
            "/login".to_owned()
        };
        return ResolvedRoute::new(route);
    }
    if let Some(redirect) = &intent.requested_redirect {
        // Auth pages always carry a marker, so the wrap is unreachable too.
        if !intent.carries_auth_marker() {
            return ResolvedRoute::new(format!("/login?redirect={redirect}"));
        }
        return ResolvedRoute::new(path);
    }
    if intent.is_auth_page() {
        return ResolvedRoute::new(path);
    }
    ResolvedRoute::new("/login")
}
