//! Front-matter splitting.
//!
//! # Responsibility
//! - Split raw document text into a metadata block and a body.
//!
//! # Invariants
//! - The opening `---` delimiter must be the first line (a UTF-8 BOM is skipped).
//! - The closing delimiter is the next `---` or `...` line.
//! - The body is returned byte-for-byte; no line ending or whitespace is rewritten.

use crate::model::error::DocumentError;
use std::error::Error;
use std::fmt::{Display, Formatter};

const OPENING_DELIMITER: &str = "---";
const CLOSING_DELIMITERS: &[&str] = &["---", "..."];
const BOM: char = '\u{feff}';

/// Borrowed view of a split document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Text between the delimiter lines, line terminators included.
    pub metadata: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Structural failures of front-matter splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterError {
    EmptyInput,
    MissingOpeningDelimiter,
    MissingClosingDelimiter,
}

impl Display for FrontMatterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "document is empty"),
            Self::MissingOpeningDelimiter => {
                write!(f, "document must start with a `---` delimiter line")
            }
            Self::MissingClosingDelimiter => {
                write!(f, "front matter has no closing `---` delimiter line")
            }
        }
    }
}

impl Error for FrontMatterError {}

impl From<FrontMatterError> for DocumentError {
    fn from(value: FrontMatterError) -> Self {
        Self::MalformedDocument(value.to_string())
    }
}

/// Splits `input` into metadata and body blocks.
///
/// # Errors
/// - `EmptyInput` when `input` holds no text.
/// - `MissingOpeningDelimiter` when the first line is not `---`.
/// - `MissingClosingDelimiter` when no later delimiter line exists.
pub fn split_front_matter(input: &str) -> Result<FrontMatter<'_>, FrontMatterError> {
    let text = input.strip_prefix(BOM).unwrap_or(input);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next().ok_or(FrontMatterError::EmptyInput)?;
    if delimiter_text(first) != OPENING_DELIMITER {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    }

    let metadata_start = first.len();
    let mut offset = metadata_start;
    for line in lines {
        if CLOSING_DELIMITERS.contains(&delimiter_text(line)) {
            return Ok(FrontMatter {
                metadata: &text[metadata_start..offset],
                body: &text[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::MissingClosingDelimiter)
}

fn delimiter_text(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r']).trim_end()
}
