//! Trait seams for the pipeline's external collaborators.
//!
//! The catalog, the execution platform, and the semantic index are all
//! consumed through these traits so the selection and fallback logic can be
//! exercised entirely in-process. Mock implementations live in
//! [`crate::testing`]; platform-backed implementations live behind the
//! `apify` and `gemini` cargo features.

use async_trait::async_trait;

use crate::error::{IndexerError, RunnerError, SelectError};
use crate::selector::TargetKind;
use crate::types::{AuditEntry, CatalogEntry, CorpusMetadata, DocumentFile, RunLimits, ScrapedRecord};

/// Catalog of available scraping workers.
#[async_trait]
pub trait ScraperCatalog: Send + Sync {
    /// Search the catalog for workers suited to this kind of target.
    /// Returns raw listings; compliance filtering happens in the selector.
    async fn search(
        &self,
        kind: TargetKind,
        limit: usize,
    ) -> std::result::Result<Vec<CatalogEntry>, SelectError>;
}

/// Execution platform for a single scraper attempt.
#[async_trait]
pub trait ScraperRunner: Send + Sync {
    /// Run one scraper attempt against `target`. The future resolves only
    /// when the platform run has terminated; there is no early cancellation.
    async fn run(
        &self,
        scraper_id: &str,
        target: &str,
        limits: &RunLimits,
    ) -> std::result::Result<Vec<ScrapedRecord>, RunnerError>;
}

/// Observer for the append-only audit trail of scraper attempts.
///
/// Invoked after every attempt — success, failure, or compliance skip. Sinks
/// never influence control flow; the fallback decision is made before the
/// sink sees the entry.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

/// Semantic-search index that converted documents are uploaded into.
#[async_trait]
pub trait SearchIndexer: Send + Sync {
    /// Upload documents into a corpus named `corpus_name` and return its
    /// metadata once every file is indexed.
    async fn index_documents(
        &self,
        documents: &[DocumentFile],
        corpus_name: &str,
    ) -> std::result::Result<CorpusMetadata, IndexerError>;
}
