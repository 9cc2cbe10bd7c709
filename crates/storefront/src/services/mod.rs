//! Storefront services.
//!
//! Services hold the behavior between the HTTP handlers and the
//! repositories; both collaborators are passed in explicitly so every
//! service is testable without a live database or request cycle.

pub mod cart;
pub mod catalog;
