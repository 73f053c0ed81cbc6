//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render storefront chrome (header, toasts) and the try-on
//! panel while reading and writing shared state from Leptos context
//! providers.

pub mod header;
pub mod toasts;
pub mod try_on;
