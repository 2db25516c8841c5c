//! billing-core: Billing cycle projection and settlement for multi-tenant
//! coaching rosters.
//!
//! The store keeps one due-date/status pointer per student. This crate
//! reconstructs every billing cycle of a requested month from that pointer
//! at read time, aggregates month totals against recorded expenses, and
//! advances the pointer when a coach settles a cycle.

pub mod models;
pub mod projection;
pub mod services;
pub mod store;
