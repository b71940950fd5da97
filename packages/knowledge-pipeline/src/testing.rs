//! Testing utilities including mock implementations.
//!
//! These are useful for exercising selection, fallback, and the full
//! pipeline without touching the scraping platform or the semantic index.
//! All mocks track their calls for assertions and share state across clones,
//! so a handle kept outside the pipeline still sees what happened inside it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::documents::estimate_indexing_cost;
use crate::error::{IndexerError, RunnerError, SelectError};
use crate::selector::TargetKind;
use crate::traits::{AuditSink, ScraperCatalog, ScraperRunner, SearchIndexer};
use crate::types::{
    AuditEntry, CatalogEntry, CorpusMetadata, DocumentFile, RunLimits, ScrapedRecord,
};

/// Catalog backed by a fixed entry list.
#[derive(Default, Clone)]
pub struct MockCatalog {
    entries: Vec<CatalogEntry>,
    fail_with: Option<String>,
    calls: Arc<RwLock<Vec<TargetKind>>>,
}

impl MockCatalog {
    /// Catalog that returns these entries for every search.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Catalog whose every search fails with a platform error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Default::default()
        }
    }

    /// Target kinds searched so far, in order.
    pub fn calls(&self) -> Vec<TargetKind> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ScraperCatalog for MockCatalog {
    async fn search(
        &self,
        kind: TargetKind,
        limit: usize,
    ) -> std::result::Result<Vec<CatalogEntry>, SelectError> {
        self.calls.write().unwrap().push(kind);
        if let Some(message) = &self.fail_with {
            return Err(SelectError::Catalog(message.clone().into()));
        }
        Ok(self.entries.iter().take(limit).cloned().collect())
    }
}

/// One scripted behavior for a mock scraper run.
#[derive(Debug, Clone)]
enum ScriptedRun {
    Records(Vec<ScrapedRecord>),
    Empty,
    Fail(String),
}

/// Runner that replays scripted behaviors per scraper id.
///
/// Unscripted scrapers return an empty payload.
#[derive(Default, Clone)]
pub struct MockRunner {
    scripts: HashMap<String, ScriptedRun>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a scraper to return these records.
    pub fn with_records(
        mut self,
        scraper_id: impl Into<String>,
        records: Vec<ScrapedRecord>,
    ) -> Self {
        self.scripts
            .insert(scraper_id.into(), ScriptedRun::Records(records));
        self
    }

    /// Script a scraper to return an empty payload.
    pub fn with_empty(mut self, scraper_id: impl Into<String>) -> Self {
        self.scripts.insert(scraper_id.into(), ScriptedRun::Empty);
        self
    }

    /// Script a scraper to fail with this message.
    pub fn with_failure(
        mut self,
        scraper_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.scripts
            .insert(scraper_id.into(), ScriptedRun::Fail(message.into()));
        self
    }

    /// Ids of scrapers actually attempted, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ScraperRunner for MockRunner {
    async fn run(
        &self,
        scraper_id: &str,
        _target: &str,
        _limits: &RunLimits,
    ) -> std::result::Result<Vec<ScrapedRecord>, RunnerError> {
        self.calls.write().unwrap().push(scraper_id.to_string());
        match self.scripts.get(scraper_id) {
            Some(ScriptedRun::Records(records)) => Ok(records.clone()),
            Some(ScriptedRun::Empty) | None => Ok(Vec::new()),
            Some(ScriptedRun::Fail(message)) => Err(RunnerError::new(message.clone())),
        }
    }
}

/// Audit sink that stores entries for assertions.
#[derive(Default, Clone)]
pub struct RecordingAudit {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything audited so far, in order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().unwrap().clone()
    }
}

impl AuditSink for RecordingAudit {
    fn record(&self, entry: &AuditEntry) {
        self.entries.write().unwrap().push(entry.clone());
    }
}

/// Indexer that fabricates corpus metadata without any network calls.
#[derive(Default, Clone)]
pub struct MockIndexer {
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document counts of each `index_documents` call.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndexer for MockIndexer {
    async fn index_documents(
        &self,
        documents: &[DocumentFile],
        corpus_name: &str,
    ) -> std::result::Result<CorpusMetadata, IndexerError> {
        self.calls.write().unwrap().push(documents.len());
        let estimate = estimate_indexing_cost(documents);
        Ok(CorpusMetadata {
            store_name: format!("fileSearchStores/mock-{corpus_name}"),
            corpus_name: corpus_name.to_string(),
            files_indexed: documents.len(),
            estimated_tokens: estimate.estimated_tokens,
            cost_estimate_usd: estimate.cost_usd,
            created_at: Utc::now(),
        })
    }
}
