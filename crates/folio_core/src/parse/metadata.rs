//! Metadata validation and rendering.
//!
//! # Responsibility
//! - Parse a YAML metadata block into a validated `Document`.
//! - Render a document back into front-matter text.
//!
//! # Invariants
//! - Required fields are checked in the order `title`, `slug`, `date`, `summary`.
//! - Unrecognized fields are preserved in source order and never validated.
//! - The body passed in is attached untouched.
//!
//! # See also
//! - `parse::front_matter` for delimiter handling.

use crate::model::document::{normalize_tag, Document};
use crate::model::error::{DocumentError, DocumentResult};
use crate::parse::front_matter::split_front_matter;
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;

const FIELD_TITLE: &str = "title";
const FIELD_SLUG: &str = "slug";
const FIELD_DATE: &str = "date";
const FIELD_SUMMARY: &str = "summary";
const FIELD_TAGS: &str = "tags";
const FIELD_DRAFT: &str = "draft";

const KNOWN_FIELDS: &[&str] = &[
    FIELD_TITLE,
    FIELD_SLUG,
    FIELD_DATE,
    FIELD_SUMMARY,
    FIELD_TAGS,
    FIELD_DRAFT,
];

const PLACEHOLDER_VALUES: &[&str] = &["undefined", "null"];

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Parses raw document text (front matter plus body) into a `Document`.
pub fn parse_document(input: &str) -> DocumentResult<Document> {
    let split = split_front_matter(input)?;
    validate_metadata(split.metadata, split.body)
}

/// Parses `metadata` as YAML and validates it against the document schema.
///
/// # Errors
/// - `MalformedDocument` when the block is not YAML or not a string-keyed mapping.
/// - `MissingField` / `PlaceholderValue` / `InvalidField` for required strings.
/// - `InvalidDate`, `InvalidTags`, `InvalidSlug` for the respective fields.
pub fn validate_metadata(metadata: &str, body: &str) -> DocumentResult<Document> {
    let fields = parse_mapping(metadata)?;

    let title = required_string(&fields, FIELD_TITLE)?;
    let slug = required_string(&fields, FIELD_SLUG)?;
    let date = required_date(&fields)?;
    let summary = required_string(&fields, FIELD_SUMMARY)?;
    let tags = optional_tags(&fields)?;
    let draft = optional_draft(&fields)?;
    let extra = extra_fields(&fields)?;

    let document = Document {
        slug,
        title,
        date,
        tags,
        summary,
        body: body.to_string(),
        draft,
        extra,
    };
    document.validate()?;
    Ok(document)
}

/// Parses a calendar date in `YYYY-MM-DD` or RFC 3339 date-time form.
///
/// Date-times keep the calendar date of their own offset.
pub fn parse_date(value: &str) -> DocumentResult<NaiveDate> {
    let trimmed = value.trim();
    if ISO_DATE_RE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| DocumentError::InvalidDate(trimmed.to_string()));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|date_time| date_time.date_naive())
        .map_err(|_| DocumentError::InvalidDate(trimmed.to_string()))
}

/// Renders the metadata of `document` as a delimited YAML block.
///
/// Known fields come first in a fixed order, followed by extra fields in
/// their preserved order.
pub fn render_front_matter(document: &Document) -> Result<String, serde_yaml::Error> {
    let mut fields = Mapping::new();
    fields.insert(FIELD_TITLE.into(), document.title.clone().into());
    fields.insert(FIELD_SLUG.into(), document.slug.clone().into());
    fields.insert(
        FIELD_DATE.into(),
        document.date.format("%Y-%m-%d").to_string().into(),
    );
    fields.insert(FIELD_SUMMARY.into(), document.summary.clone().into());
    fields.insert(
        FIELD_TAGS.into(),
        Value::Sequence(document.tags.iter().cloned().map(Value::from).collect()),
    );
    fields.insert(FIELD_DRAFT.into(), document.draft.into());
    for (key, value) in &document.extra {
        fields.insert(key.clone(), value.clone());
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(fields))?;
    Ok(format!("---\n{yaml}---\n"))
}

/// Renders front matter followed by the untouched body.
pub fn render_document(document: &Document) -> Result<String, serde_yaml::Error> {
    let mut rendered = render_front_matter(document)?;
    rendered.push_str(&document.body);
    Ok(rendered)
}

fn parse_mapping(metadata: &str) -> DocumentResult<Mapping> {
    if metadata.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(metadata)
        .map_err(|err| DocumentError::MalformedDocument(format!("invalid metadata: {err}")))?;
    match value {
        Value::Mapping(fields) => Ok(fields),
        Value::Null => Ok(Mapping::new()),
        other => Err(DocumentError::MalformedDocument(format!(
            "metadata must be a mapping, found {}",
            value_kind(&other)
        ))),
    }
}

fn required_string(fields: &Mapping, field: &'static str) -> DocumentResult<String> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(DocumentError::MissingField(field)),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(DocumentError::MissingField(field))
            } else if is_placeholder(trimmed) {
                Err(DocumentError::PlaceholderValue(field))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(other) => Err(DocumentError::InvalidField {
            field: field.to_string(),
            message: format!("expected a string, found {}", value_kind(other)),
        }),
    }
}

fn required_date(fields: &Mapping) -> DocumentResult<NaiveDate> {
    match fields.get(FIELD_DATE) {
        None | Some(Value::Null) => Err(DocumentError::MissingField(FIELD_DATE)),
        Some(Value::String(raw)) if raw.trim().is_empty() => {
            Err(DocumentError::MissingField(FIELD_DATE))
        }
        Some(Value::String(raw)) => parse_date(raw),
        Some(other) => Err(DocumentError::InvalidDate(render_scalar(other))),
    }
}

fn optional_tags(fields: &Mapping) -> DocumentResult<BTreeSet<String>> {
    let entries = match fields.get(FIELD_TAGS) {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Sequence(entries)) => entries,
        Some(other) => {
            return Err(DocumentError::InvalidTags(format!(
                "expected a sequence of strings, found {}",
                value_kind(other)
            )));
        }
    };

    let mut tags = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let Value::String(raw) = entry else {
            return Err(DocumentError::InvalidTags(format!(
                "entry {index} is {}, expected a string",
                value_kind(entry)
            )));
        };
        let tag = normalize_tag(raw).ok_or_else(|| {
            DocumentError::InvalidTags(format!("entry {index} is an empty string"))
        })?;
        if is_placeholder(&tag) {
            return Err(DocumentError::InvalidTags(format!(
                "entry {index} is a placeholder value `{tag}`"
            )));
        }
        tags.insert(tag);
    }
    Ok(tags)
}

fn optional_draft(fields: &Mapping) -> DocumentResult<bool> {
    match fields.get(FIELD_DRAFT) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(draft)) => Ok(*draft),
        Some(other) => Err(DocumentError::InvalidField {
            field: FIELD_DRAFT.to_string(),
            message: format!("expected a boolean, found {}", value_kind(other)),
        }),
    }
}

fn extra_fields(fields: &Mapping) -> DocumentResult<Mapping> {
    let mut extra = Mapping::new();
    for (key, value) in fields {
        let Value::String(name) = key else {
            return Err(DocumentError::MalformedDocument(format!(
                "metadata keys must be strings, found {}",
                value_kind(key)
            )));
        };
        if KNOWN_FIELDS.contains(&name.as_str()) {
            continue;
        }
        extra.insert(key.clone(), value.clone());
    }
    Ok(extra)
}

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES
        .iter()
        .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => value_kind(other).to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
