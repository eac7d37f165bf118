//! Command-line inspector over `folio_core`.
//!
//! # Responsibility
//! - Load a directory of Markdown articles and print the resulting listing.
//! - Print every ingestion failure so broken front matter is easy to spot.

use clap::{Parser, ValueEnum};
use folio_core::{DocumentFilter, DocumentStore, DraftFilter, QueryService};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Drafts {
    Any,
    Published,
    Only,
}

impl From<Drafts> for DraftFilter {
    fn from(value: Drafts) -> Self {
        match value {
            Drafts::Any => Self::Any,
            Drafts::Published => Self::Published,
            Drafts::Only => Self::DraftsOnly,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Inspect a directory of front-matter articles")]
struct Args {
    /// Directory holding `*.md` articles.
    dir: PathBuf,

    /// Only list documents carrying this tag.
    #[arg(long)]
    tag: Option<String>,

    /// Draft visibility.
    #[arg(long, value_enum, default_value_t = Drafts::Any)]
    drafts: Drafts,

    /// Page size (defaults to 10, capped at 50).
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "FOLIO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "FOLIO_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args
            .log_level
            .as_deref()
            .unwrap_or(folio_core::default_log_level());
        if let Err(err) = folio_core::init_logging(level, log_dir) {
            eprintln!("folio: logging disabled: {err}");
        }
    }

    let sources = match folio_core::load_dir(&args.dir) {
        Ok(sources) => sources,
        Err(err) => {
            error!("event=sources_load module=cli status=error");
            eprintln!("folio: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (store, report) = DocumentStore::ingest(sources);
    let service = QueryService::new(&store);
    let filter = DocumentFilter {
        tag: args.tag,
        draft: args.drafts.into(),
    };

    let page = service.list_page(&filter, args.limit, args.offset);
    for document in &page.items {
        let marker = if document.draft { " [draft]" } else { "" };
        println!(
            "{}  {}  {}{}",
            document.date, document.slug, document.title, marker
        );
    }
    println!(
        "listed={} matching={} loaded={} failed={}",
        page.items.len(),
        page.total,
        report.loaded.len(),
        report.failures.len()
    );

    for failure in &report.failures {
        println!("rejected {}: {}", failure.origin, failure.error);
    }

    ExitCode::SUCCESS
}
