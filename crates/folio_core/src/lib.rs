//! Document record store for front-matter Markdown articles.
//!
//! Raw sources go through front-matter splitting and metadata validation,
//! then land in an immutable, slug-keyed snapshot served by a read-only
//! query façade.

pub mod loader;
pub mod logging;
pub mod model;
pub mod parse;
pub mod service;
pub mod store;

pub use loader::{load_dir, SourceError};
pub use logging::{default_log_level, init_logging, LogSettings, LoggingError};
pub use model::document::{is_valid_slug, normalize_tag, normalize_tags, Document};
pub use model::error::{DocumentError, DocumentResult};
pub use model::source::Source;
pub use parse::front_matter::{split_front_matter, FrontMatter, FrontMatterError};
pub use parse::metadata::{
    parse_date, parse_document, render_document, render_front_matter, validate_metadata,
};
pub use service::query_service::{normalize_page_limit, Adjacent, DocumentPage, QueryService};
pub use store::document_store::{DocumentFilter, DocumentStore, DraftFilter, TagCount};
pub use store::report::{IngestFailure, IngestReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
