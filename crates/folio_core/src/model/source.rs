//! Raw source text handed to ingestion.

/// One raw document plus a label naming where it came from.
///
/// The label is only used in reports and log events; the core makes no
/// assumption about it being a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Origin label, e.g. a file path or URL.
    pub origin: String,
    /// Full document text, front matter included.
    pub text: String,
}

impl Source {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }
}
