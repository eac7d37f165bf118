//! Document error taxonomy.
//!
//! # Responsibility
//! - Name every per-document failure raised by parsing, validation and the store.
//! - Keep failures as values so batch ingestion can collect them.
//!
//! # Invariants
//! - Errors never carry body text, only field names, slugs and short reasons.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Per-document failure reported by ingestion and lookup APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Front-matter delimiters are missing or the metadata block is not a mapping.
    MalformedDocument(String),
    /// A required metadata field is absent or blank.
    MissingField(&'static str),
    /// A metadata field has the wrong type.
    InvalidField { field: String, message: String },
    /// A required field still holds a placeholder such as `undefined`.
    PlaceholderValue(&'static str),
    /// Slug is not a URL-safe token.
    InvalidSlug(String),
    /// `date` does not parse as an unambiguous calendar date.
    InvalidDate(String),
    /// `tags` is not a sequence of non-empty strings.
    InvalidTags(String),
    /// Another document already owns this slug.
    DuplicateSlug(String),
    /// No document with this slug exists in the snapshot.
    NotFound(String),
}

impl DocumentError {
    /// Stable snake_case identifier used in log events and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) => "malformed_document",
            Self::MissingField(_) => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::PlaceholderValue(_) => "placeholder_value",
            Self::InvalidSlug(_) => "invalid_slug",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidTags(_) => "invalid_tags",
            Self::DuplicateSlug(_) => "duplicate_slug",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDocument(reason) => write!(f, "malformed document: {reason}"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField { field, message } => {
                write!(f, "invalid field `{field}`: {message}")
            }
            Self::PlaceholderValue(field) => {
                write!(f, "field `{field}` holds a placeholder value")
            }
            Self::InvalidSlug(slug) => write!(f, "slug is not URL-safe: `{slug}`"),
            Self::InvalidDate(value) => write!(f, "invalid date `{value}` (expected YYYY-MM-DD)"),
            Self::InvalidTags(reason) => write!(f, "invalid tags: {reason}"),
            Self::DuplicateSlug(slug) => write!(f, "duplicate slug: {slug}"),
            Self::NotFound(slug) => write!(f, "document not found: {slug}"),
        }
    }
}

impl Error for DocumentError {}
