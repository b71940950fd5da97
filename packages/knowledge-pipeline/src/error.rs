//! Typed errors for the knowledge pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-candidate scraper failures
//! are deliberately NOT errors at this level: the executor absorbs them into
//! fallback progression and only exhaustion surfaces to the caller.

use thiserror::Error;

use crate::selector::TargetKind;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal, caller-visible pipeline failures. The caller always receives a
/// single terminal outcome: success with metadata, or one of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required input missing or invalid; raised before any external call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Scraper selection failed (catalog error or nothing eligible).
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Every candidate failed; reasons are ordered as observed.
    #[error("all scrapers failed: {}", errors.join("; "))]
    AllScrapersFailed { errors: Vec<String> },

    /// The scrape succeeded but produced no usable documents.
    #[error("no valid documents created from scraped data")]
    NoDocuments,

    /// Semantic index upload failed.
    #[error("indexing error: {0}")]
    Indexing(#[from] IndexerError),

    /// Filesystem failure while writing documents or the query guide.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from catalog search and candidate selection.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The catalog query itself failed.
    #[error("catalog query failed: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No allowed worker remained after compliance filtering. Not retried:
    /// re-querying an empty catalog is pointless.
    #[error("no eligible scraper found for {target_kind} target")]
    NoEligibleScraper { target_kind: TargetKind },
}

/// Failure of a single scraper attempt. Recoverable: the executor records it
/// and falls back to the next candidate.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RunnerError {
    pub message: String,
}

impl RunnerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from the semantic-search indexer.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Document upload or import failed.
    #[error("document upload failed: {0}")]
    Upload(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store itself could not be created or queried.
    #[error("semantic store error: {0}")]
    Store(String),
}
