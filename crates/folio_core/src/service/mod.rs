//! Read-side use-case services.
//!
//! # Responsibility
//! - Offer renderer-facing lookup and listing APIs.
//! - Keep callers decoupled from how the store was built.

pub mod query_service;
