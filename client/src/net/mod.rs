//! Networking modules for the SSR host, identity provider and record store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to our own server, `identity` and `records` talk to the hosted
//! backend, and `types` defines the shared wire schema.

pub mod api;
pub mod identity;
pub mod records;
pub mod types;
