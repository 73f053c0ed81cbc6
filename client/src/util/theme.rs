//! Light/dark theme initialization and toggle.
//!
//! Reads the visitor's preference from `localStorage["theme"]` and applies
//! the `dark` class to the `<html>` element. Toggle writes back to
//! `localStorage` and updates that class. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! safely no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "theme";

#[cfg(feature = "hydrate")]
const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value stored under the `theme` key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Pick the theme from a stored value, falling back to the OS preference
/// only when nothing is stored. Any stored value other than `dark` is light.
#[must_use]
pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    match stored {
        Some("dark") => Theme::Dark,
        Some(_) => Theme::Light,
        None if system_prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Read the theme preference from localStorage and the OS color scheme.
pub fn read_preference() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Theme::Light;
        };

        let stored = window
            .local_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());

        let system_prefers_dark = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches());

        resolve(stored.as_deref(), system_prefers_dark)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        resolve(None, false)
    }
}

/// Add or remove the `dark` class on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let classes = el.class_list();
            let _ = if theme.is_dark() { classes.add_1(DARK_CLASS) } else { classes.remove_1(DARK_CLASS) };
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}

/// Flip the theme, apply it and persist the new value to localStorage.
pub fn toggle(current: Theme) -> Theme {
    let next = current.toggled();
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(STORAGE_KEY, next.as_str());
            }
        }
    }
    next
}
