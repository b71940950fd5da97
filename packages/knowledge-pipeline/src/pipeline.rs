//! End-to-end pipeline orchestration.
//!
//! Selection → fallback execution → document conversion → semantic indexing
//! → pricing → query guide. The pipeline is generic over its external
//! collaborators so the whole flow runs in-process under test; the caller
//! always receives a single terminal outcome, success or a typed error.

use std::path::PathBuf;

use tracing::info;

use crate::documents::convert_records;
use crate::error::{PipelineError, Result};
use crate::executor::{run_with_fallback, TracingAudit};
use crate::pricing::{price_run, PriceBreakdown};
use crate::report::query_guide;
use crate::selector::{select_scrapers, BudgetMode, TargetKind};
use crate::traits::{AuditSink, ScraperCatalog, ScraperRunner, SearchIndexer};
use crate::types::{CorpusMetadata, RunLimits};

/// JSON fields holding page URL / HTML in scraped records.
const URL_FIELD: &str = "url";
const HTML_FIELD: &str = "html";

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target URL or resource identifier. Required.
    pub target: String,
    /// Human-chosen name for the semantic-search corpus.
    pub corpus_name: String,
    pub budget: BudgetMode,
    /// Candidate list length: one primary plus fallbacks.
    pub top_n: usize,
    pub limits: RunLimits,
    /// Directory for converted documents and the query guide.
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a config for a target with the standard defaults.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            corpus_name: "scraped-knowledge".to_string(),
            budget: BudgetMode::default(),
            top_n: 3,
            limits: RunLimits::default(),
            output_dir: PathBuf::from("documents"),
        }
    }

    /// Set the corpus name.
    pub fn with_corpus_name(mut self, name: impl Into<String>) -> Self {
        self.corpus_name = name.into();
        self
    }

    /// Set the budget preference.
    pub fn with_budget(mut self, budget: BudgetMode) -> Self {
        self.budget = budget;
        self
    }

    /// Set the candidate list length.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the execution limits.
    pub fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Check required inputs. Runs before any external call.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(PipelineError::Config("target must not be empty".into()));
        }
        if self.top_n == 0 {
            return Err(PipelineError::Config("top_n must be at least 1".into()));
        }
        Ok(())
    }
}

/// Terminal report of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub target: String,
    pub target_kind: TargetKind,
    /// Identifier of the scraper that produced the data.
    pub scraper_used: String,
    pub pages_scraped: usize,
    pub documents_created: usize,
    pub corpus: CorpusMetadata,
    pub pricing: PriceBreakdown,
    pub query_guide_path: PathBuf,
}

/// The orchestrator. Owns one request's worth of state; nothing is shared
/// across runs.
pub struct KnowledgePipeline<C, R, I> {
    catalog: C,
    runner: R,
    indexer: I,
    audit: Box<dyn AuditSink>,
    config: PipelineConfig,
}

impl<C, R, I> KnowledgePipeline<C, R, I>
where
    C: ScraperCatalog,
    R: ScraperRunner,
    I: SearchIndexer,
{
    pub fn new(catalog: C, runner: R, indexer: I, config: PipelineConfig) -> Self {
        Self {
            catalog,
            runner,
            indexer,
            audit: Box::new(TracingAudit),
            config,
        }
    }

    /// Replace the default tracing audit sink.
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Run the pipeline to completion.
    pub async fn run(&self) -> Result<PipelineOutput> {
        self.config.validate()?;

        info!(target = %self.config.target, "phase 1: scraper selection");
        let selection = select_scrapers(
            &self.catalog,
            &self.config.target,
            self.config.budget,
            self.config.top_n,
        )
        .await?;
        info!(
            candidates = selection.candidates.len(),
            kind = %selection.target_kind,
            "selected scrapers with fallbacks"
        );

        info!("phase 2: scraping with fallback");
        let result = run_with_fallback(
            &self.runner,
            self.audit.as_ref(),
            &selection.candidates,
            &self.config.target,
            &self.config.limits,
        )
        .await;

        let Some(scraper_used) = result.scraper_used.clone().filter(|_| result.success) else {
            return Err(PipelineError::AllScrapersFailed {
                errors: result.errors,
            });
        };
        let pages_scraped = result.records.len();
        info!(scraper = %scraper_used, pages = pages_scraped, "scraping complete");

        info!("phase 3: document conversion");
        let documents =
            convert_records(&result.records, &self.config.output_dir, URL_FIELD, HTML_FIELD)?;
        if documents.is_empty() {
            return Err(PipelineError::NoDocuments);
        }
        info!(documents = documents.len(), "converted documents");

        info!("phase 4: semantic index upload");
        let corpus = self
            .indexer
            .index_documents(&documents, &self.config.corpus_name)
            .await?;
        info!(
            store = %corpus.store_name,
            files = corpus.files_indexed,
            "knowledge base ready"
        );

        info!("phase 5: pricing");
        let pricing = price_run(pages_scraped, corpus.cost_estimate_usd);
        info!(tier = %pricing.tier, total = pricing.total_usd, "computed price");

        info!("phase 6: query guide");
        let guide = query_guide(&corpus);
        let query_guide_path = self.config.output_dir.join("query-guide.md");
        std::fs::write(&query_guide_path, guide)?;

        Ok(PipelineOutput {
            target: self.config.target.clone(),
            target_kind: selection.target_kind,
            scraper_used,
            pages_scraped,
            documents_created: documents.len(),
            corpus,
            pricing,
            query_guide_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCatalog, MockIndexer, MockRunner};

    #[tokio::test]
    async fn empty_target_fails_before_any_external_call() {
        let catalog = MockCatalog::new(Vec::new());
        let pipeline = KnowledgePipeline::new(
            catalog.clone(),
            MockRunner::new(),
            MockIndexer::new(),
            PipelineConfig::new(""),
        );

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_top_n_is_a_configuration_error() {
        let pipeline = KnowledgePipeline::new(
            MockCatalog::new(Vec::new()),
            MockRunner::new(),
            MockIndexer::new(),
            PipelineConfig::new("https://example.com").with_top_n(0),
        );

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
