//! In-memory document store.
//!
//! # Responsibility
//! - Hold validated documents keyed by slug for one load-then-query session.
//! - Run batch ingestion and report every rejected source.
//!
//! # Invariants
//! - Slugs are unique; a duplicate insert is rejected and the first document kept.
//! - Listing order is `date DESC, slug ASC` and identical across calls.
//! - The key set equals the set of successfully validated inputs.

use crate::logging::single_line_field;
use crate::model::document::{normalize_tag, Document};
use crate::model::error::{DocumentError, DocumentResult};
use crate::model::source::Source;
use crate::parse::metadata::parse_document;
use crate::store::report::{IngestFailure, IngestReport};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

const MAX_LOGGED_ORIGIN_CHARS: usize = 120;

/// Draft visibility for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftFilter {
    /// Drafts and published documents.
    #[default]
    Any,
    /// Only documents with `draft == false`.
    Published,
    /// Only documents with `draft == true`.
    DraftsOnly,
}

impl DraftFilter {
    fn admits(self, document: &Document) -> bool {
        match self {
            Self::Any => true,
            Self::Published => document.is_published(),
            Self::DraftsOnly => document.draft,
        }
    }
}

/// Listing filter over tags and draft status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Optional single-tag exact match, normalized before comparison.
    pub tag: Option<String>,
    pub draft: DraftFilter,
}

impl DocumentFilter {
    /// Filter admitting only published documents.
    pub fn published() -> Self {
        Self {
            tag: None,
            draft: DraftFilter::Published,
        }
    }

    /// Restricts this filter to documents carrying `tag`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns whether `document` passes this filter.
    pub fn matches(&self, document: &Document) -> bool {
        if !self.draft.admits(document) {
            return false;
        }
        match &self.tag {
            Some(tag) => document.has_tag(tag),
            None => true,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            tag: self.tag.as_deref().and_then(normalize_tag),
            draft: self.draft,
        }
    }
}

/// Tag name with the number of documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ListingKey {
    date: Reverse<NaiveDate>,
    slug: String,
}

/// Slug-keyed document snapshot.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
    order: BTreeSet<ListingKey>,
}

impl DocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses, validates and inserts every source, collecting failures.
    ///
    /// One bad source never aborts the batch. The first source claiming a
    /// slug wins; later ones are reported as `DuplicateSlug`.
    pub fn ingest<I>(sources: I) -> (Self, IngestReport)
    where
        I: IntoIterator<Item = Source>,
    {
        let mut store = Self::new();
        let mut report = IngestReport::default();

        for source in sources {
            let origin = single_line_field(&source.origin, MAX_LOGGED_ORIGIN_CHARS);
            let outcome = parse_document(&source.text).and_then(|document| {
                let slug = document.slug.clone();
                store.insert(document).map(|()| slug)
            });

            match outcome {
                Ok(slug) => {
                    debug!(
                        "event=document_ingested module=store status=ok slug={} origin={}",
                        slug, origin
                    );
                    report.loaded.push(slug);
                }
                Err(error) => {
                    warn!(
                        "event=document_rejected module=store status=error error_kind={} origin={}",
                        error.kind(),
                        origin
                    );
                    report.failures.push(IngestFailure {
                        origin: source.origin,
                        error,
                    });
                }
            }
        }

        info!(
            "event=ingest_complete module=store status=ok loaded={} failed={}",
            report.loaded.len(),
            report.failures.len()
        );
        (store, report)
    }

    /// Inserts one document.
    ///
    /// # Errors
    /// - Any `Document::validate` failure.
    /// - `DuplicateSlug` when the slug is already present; the store is unchanged.
    pub fn insert(&mut self, document: Document) -> DocumentResult<()> {
        document.validate()?;
        if self.documents.contains_key(&document.slug) {
            return Err(DocumentError::DuplicateSlug(document.slug));
        }

        self.order.insert(ListingKey {
            date: Reverse(document.date),
            slug: document.slug.clone(),
        });
        self.documents.insert(document.slug.clone(), document);
        Ok(())
    }

    /// Gets one document by slug.
    ///
    /// # Errors
    /// - `NotFound` when no document owns `slug`.
    pub fn get(&self, slug: &str) -> DocumentResult<&Document> {
        self.documents
            .get(slug)
            .ok_or_else(|| DocumentError::NotFound(slug.to_string()))
    }

    /// Lists documents by `date DESC, slug ASC`, optionally filtered.
    ///
    /// Each call returns a fresh lazy iterator over the same snapshot.
    pub fn list<'a>(
        &'a self,
        filter: Option<&DocumentFilter>,
    ) -> impl Iterator<Item = &'a Document> + 'a {
        let filter = filter.map(DocumentFilter::normalized).unwrap_or_default();
        self.list_where(move |document| filter.matches(document))
    }

    /// Lists documents in listing order that satisfy `predicate`.
    pub fn list_where<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a Document> + 'a
    where
        F: Fn(&Document) -> bool + 'a,
    {
        self.order
            .iter()
            .filter_map(move |key| self.documents.get(&key.slug))
            .filter(move |document| predicate(*document))
    }

    /// Slugs in listing order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|key| key.slug.as_str())
    }

    /// All known tags, sorted by name, with document counts.
    pub fn tags(&self) -> Vec<TagCount> {
        let mut counts = BTreeMap::<&str, usize>::new();
        for document in self.documents.values() {
            for tag in &document.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.documents.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentFilter, DocumentStore, DraftFilter};
    use crate::model::document::Document;
    use crate::model::error::DocumentError;
    use chrono::NaiveDate;
    use serde_yaml::Mapping;
    use std::collections::BTreeSet;

    fn document(slug: &str, date: (i32, u32, u32), draft: bool) -> Document {
        Document {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid calendar date"),
            tags: BTreeSet::from(["databases".to_string()]),
            summary: "summary".to_string(),
            body: String::new(),
            draft,
            extra: Mapping::new(),
        }
    }

    #[test]
    fn insert_rejects_invalid_documents() {
        let mut store = DocumentStore::new();
        let err = store
            .insert(document("Not A Slug", (2025, 1, 1), false))
            .expect_err("invalid slug must be rejected");
        assert!(matches!(err, DocumentError::InvalidSlug(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn draft_filter_variants_partition_listing() {
        let mut store = DocumentStore::new();
        store
            .insert(document("live", (2025, 1, 2), false))
            .expect("insert should succeed");
        store
            .insert(document("wip", (2025, 1, 1), true))
            .expect("insert should succeed");

        let published = DocumentFilter::published();
        let drafts = DocumentFilter {
            tag: None,
            draft: DraftFilter::DraftsOnly,
        };
        let slugs = |filter: &DocumentFilter| {
            store
                .list(Some(filter))
                .map(|doc| doc.slug.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(slugs(&published), vec!["live".to_string()]);
        assert_eq!(slugs(&drafts), vec!["wip".to_string()]);
        assert_eq!(store.list(None).count(), 2);
    }

    #[test]
    fn tag_filter_is_normalized_and_blank_tag_matches_all() {
        let mut store = DocumentStore::new();
        store
            .insert(document("a", (2025, 1, 1), false))
            .expect("insert should succeed");

        let upper = DocumentFilter::default().with_tag("  DATABASES ");
        assert_eq!(store.list(Some(&upper)).count(), 1);

        let missing = DocumentFilter::default().with_tag("nosql");
        assert_eq!(store.list(Some(&missing)).count(), 0);

        let blank = DocumentFilter::default().with_tag("   ");
        assert_eq!(store.list(Some(&blank)).count(), 1);
    }

    #[test]
    fn tags_are_counted_across_documents() {
        let mut store = DocumentStore::new();
        let mut first = document("a", (2025, 1, 1), false);
        first.tags.insert("acid".to_string());
        store
            .insert(first)
            .expect("insert should succeed");
        store
            .insert(document("b", (2025, 1, 2), false))
            .expect("insert should succeed");

        let tags = store.tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "acid");
        assert_eq!(tags[0].count, 1);
        assert_eq!(tags[1].name, "databases");
        assert_eq!(tags[1].count, 2);
    }
}
