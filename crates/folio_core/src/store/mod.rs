//! Document record store.
//!
//! # Responsibility
//! - Build one immutable snapshot of validated documents from raw sources.
//! - Answer slug lookups and ordered listings over that snapshot.
//!
//! # Invariants
//! - There is no update or delete path; a store is built once, then read.
//! - Ingestion failures are reported per source and never abort the batch.

pub mod document_store;
pub mod report;
