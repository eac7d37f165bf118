//! Domain model for ingested articles.
//!
//! # Responsibility
//! - Define the canonical `Document` record consumed by renderers.
//! - Define the per-document error taxonomy shared by every layer.
//!
//! # Invariants
//! - Every document is identified by a unique, URL-safe slug.
//! - Documents are immutable once inserted into a store.

pub mod document;
pub mod error;
pub mod source;
