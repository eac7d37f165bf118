//! Read-only query façade for renderers.
//!
//! # Responsibility
//! - Expose lookup, listing and pagination over one store snapshot.
//! - Keep renderers decoupled from store construction.
//!
//! # Invariants
//! - The façade never mutates the store it borrows.
//! - Page limits default to 10 and are clamped to 50.

use crate::model::document::Document;
use crate::model::error::DocumentResult;
use crate::store::document_store::{DocumentFilter, DocumentStore, TagCount};

const PAGE_DEFAULT_LIMIT: u32 = 10;
const PAGE_LIMIT_MAX: u32 = 50;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage<'a> {
    /// Items in listing order (`date DESC, slug ASC`).
    pub items: Vec<&'a Document>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
    /// Number of documents matching the filter before pagination.
    pub total: usize,
}

/// Neighbours of one document in the unfiltered listing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent<'a> {
    /// The document listed immediately before (more recent).
    pub newer: Option<&'a Document>,
    /// The document listed immediately after (older).
    pub older: Option<&'a Document>,
}

/// Read-only façade over one `DocumentStore` snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'store> {
    store: &'store DocumentStore,
}

impl<'store> QueryService<'store> {
    pub fn new(store: &'store DocumentStore) -> Self {
        Self { store }
    }

    /// Gets one document by slug; absent slugs fail with `NotFound`.
    pub fn get(&self, slug: &str) -> DocumentResult<&'store Document> {
        self.store.get(slug)
    }

    /// Lazily lists documents matching `filter` in listing order.
    pub fn list(
        &self,
        filter: &DocumentFilter,
    ) -> impl Iterator<Item = &'store Document> + 'store {
        self.store.list(Some(filter))
    }

    /// Lists one page of documents matching `filter`.
    pub fn list_page(
        &self,
        filter: &DocumentFilter,
        limit: Option<u32>,
        offset: u32,
    ) -> DocumentPage<'store> {
        let applied_limit = normalize_page_limit(limit);
        let total = self.store.list(Some(filter)).count();
        let items = self
            .store
            .list(Some(filter))
            .skip(offset as usize)
            .take(applied_limit as usize)
            .collect();
        DocumentPage {
            items,
            applied_limit,
            total,
        }
    }

    /// Returns the newer and older neighbours of `slug`.
    ///
    /// # Errors
    /// - `NotFound` when no document owns `slug`.
    pub fn adjacent(&self, slug: &str) -> DocumentResult<Adjacent<'store>> {
        self.store.get(slug)?;
        let newer = self
            .store
            .list(None)
            .take_while(|document| document.slug != slug)
            .last();
        let older = self
            .store
            .list(None)
            .skip_while(|document| document.slug != slug)
            .nth(1);
        Ok(Adjacent { newer, older })
    }

    /// All known tags with document counts.
    pub fn tags(&self) -> Vec<TagCount> {
        self.store.tags()
    }
}

/// Applies the default page size and upper clamp.
pub fn normalize_page_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => PAGE_DEFAULT_LIMIT,
        Some(value) if value > PAGE_LIMIT_MAX => PAGE_LIMIT_MAX,
        Some(value) => value,
        None => PAGE_DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_page_limit;

    #[test]
    fn page_limit_defaults_and_clamps() {
        assert_eq!(normalize_page_limit(None), 10);
        assert_eq!(normalize_page_limit(Some(0)), 10);
        assert_eq!(normalize_page_limit(Some(25)), 25);
        assert_eq!(normalize_page_limit(Some(500)), 50);
    }
}
