//! Record-store services used by pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never talk to the record store directly. They go through a table
//! service, which reports failures as toasts and hands back plain rows.

pub mod coerce;
pub mod record;
pub mod tables;
