//! Document domain model.
//!
//! # Responsibility
//! - Define the validated record produced by ingestion and read by renderers.
//! - Own slug syntax and tag normalization rules.
//!
//! # Invariants
//! - `slug` is a URL-safe token: lowercase ASCII letters, digits, `-` and `_`.
//! - `tags` never contains empty entries and is normalized to lowercase.
//! - `body` is kept byte-for-byte as read from the source.

use crate::model::error::{DocumentError, DocumentResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::BTreeSet;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("valid slug regex"));

/// Validated article record.
///
/// Created once at ingestion time and immutable inside a store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    /// Unique URL-safe identifier.
    pub slug: String,
    /// Human-readable title.
    pub title: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Normalized tag set, may be empty.
    pub tags: BTreeSet<String>,
    /// Short description shown in listings.
    pub summary: String,
    /// Raw Markdown body. Opaque to the store.
    pub body: String,
    /// Unpublished marker. Defaults to `false`.
    pub draft: bool,
    /// Unrecognized metadata fields, preserved in source order.
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub extra: Mapping,
}

impl Document {
    /// Checks record-level invariants.
    ///
    /// Store writes call this before insertion.
    pub fn validate(&self) -> DocumentResult<()> {
        if self.title.trim().is_empty() {
            return Err(DocumentError::MissingField("title"));
        }
        if self.summary.trim().is_empty() {
            return Err(DocumentError::MissingField("summary"));
        }
        if !is_valid_slug(&self.slug) {
            return Err(DocumentError::InvalidSlug(self.slug.clone()));
        }
        for tag in &self.tags {
            match normalize_tag(tag) {
                None => {
                    return Err(DocumentError::InvalidTags(
                        "tag entries must not be empty".to_string(),
                    ));
                }
                Some(normalized) if normalized != *tag => {
                    return Err(DocumentError::InvalidTags(format!(
                        "tag `{tag}` is not normalized (expected `{normalized}`)"
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Returns whether this document carries `tag` after normalization.
    pub fn has_tag(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|normalized| self.tags.contains(&normalized))
    }

    /// Returns whether this document is visible to published listings.
    pub fn is_published(&self) -> bool {
        !self.draft
    }
}

/// Wire shape used to route deserialization through [`Document::validate`].
#[derive(Deserialize)]
struct RawDocument {
    slug: String,
    title: String,
    date: NaiveDate,
    #[serde(default)]
    tags: BTreeSet<String>,
    summary: String,
    body: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    extra: Mapping,
}

impl TryFrom<RawDocument> for Document {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        if raw.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(DocumentError::InvalidTags(
                "tag entries must not be empty".to_string(),
            ));
        }
        let document = Self {
            slug: raw.slug,
            title: raw.title,
            date: raw.date,
            tags: normalize_tags(&raw.tags),
            summary: raw.summary,
            body: raw.body,
            draft: raw.draft,
            extra: raw.extra,
        };
        document.validate()?;
        Ok(document)
    }
}

/// Returns whether `value` is a URL-safe slug.
pub fn is_valid_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// Normalizes one tag value: trimmed and lowercased, `None` when blank.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values, dropping blanks.
pub fn normalize_tags<I>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| normalize_tag(tag.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_valid_slug, normalize_tag, normalize_tags, Document};
    use crate::model::error::DocumentError;
    use chrono::NaiveDate;
    use serde_yaml::Mapping;
    use std::collections::BTreeSet;

    #[test]
    fn slug_accepts_url_safe_tokens() {
        assert!(is_valid_slug("acid-vs-base"));
        assert!(is_valid_slug("normalization_101"));
        assert!(is_valid_slug("a"));
    }

    #[test]
    fn slug_rejects_unsafe_or_malformed_tokens() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Acid"));
        assert!(!is_valid_slug("acid vs base"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("caf\u{e9}"));
    }

    #[test]
    fn validate_rejects_tags_that_skipped_normalization() {
        let document = Document {
            slug: "acid".to_string(),
            title: "ACID".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 14).expect("valid calendar date"),
            tags: BTreeSet::from([" SQL".to_string()]),
            summary: "summary".to_string(),
            body: String::new(),
            draft: false,
            extra: Mapping::new(),
        };

        let err = document.validate().expect_err("raw tag must be rejected");
        assert!(matches!(err, DocumentError::InvalidTags(_)));
    }

    #[test]
    fn tags_are_trimmed_lowercased_and_deduplicated() {
        assert_eq!(normalize_tag("  SQL "), Some("sql".to_string()));
        assert_eq!(normalize_tag("   "), None);

        let tags = normalize_tags(&["Databases", "databases", " ", "ACID"]);
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["acid".to_string(), "databases".to_string()]
        );
    }
}
