//! Depot Core - Shared types and validation library.
//!
//! This crate provides the domain types and validation rules used by the
//! Depot storefront:
//! - `storefront` - The public-facing web service
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Validation is expressed as pure
//! predicates over a candidate record; anything that requires a read from
//! storage (e.g. title uniqueness) is answered by the caller and passed in.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`product`] - The candidate product record
//! - [`validate`] - Field constraints and the per-field violation report

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod product;
pub mod types;
pub mod validate;

pub use product::ProductDraft;
pub use types::*;
pub use validate::{ValidationReport, validate_product};
