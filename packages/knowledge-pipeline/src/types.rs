//! Shared data types for the knowledge pipeline.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A worker listed in the scraping catalog.
///
/// Immutable once fetched; `id` is the canonical lookup key. `title` and
/// `description` are free-text metadata, inspected by the compliance filter
/// alongside the id. Pricing and popularity feed the ranker when the catalog
/// exposes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Price per result unit in USD.
    pub price_per_unit_usd: Option<f64>,
    /// Rolling 30-day user count, used as a popularity signal.
    pub monthly_users: Option<u64>,
}

impl CatalogEntry {
    /// Create an entry with just an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a per-unit price in USD.
    pub fn with_price(mut self, usd: f64) -> Self {
        self.price_per_unit_usd = Some(usd);
        self
    }

    /// Add a 30-day user count.
    pub fn with_monthly_users(mut self, users: u64) -> Self {
        self.monthly_users = Some(users);
        self
    }
}

/// A single scraped record as returned by the execution platform.
///
/// The pipeline makes no schema assumptions beyond "non-empty means success";
/// downstream stages pick fields (`url`, `html`) out of the raw JSON.
pub type ScrapedRecord = serde_json::Value;

/// Execution limits passed to each scraper attempt.
#[derive(Debug, Clone)]
pub struct RunLimits {
    /// Maximum pages per crawl.
    pub max_pages: u32,
    /// Maximum concurrent requests inside the scraper run.
    pub max_concurrency: u32,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_pages: 100,
            max_concurrency: 5,
        }
    }
}

impl RunLimits {
    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the in-run concurrency cap.
    pub fn with_max_concurrency(mut self, max_concurrency: u32) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Outcome tag for one audited scraper attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Succeeded,
    Empty,
    Failed,
    SkippedBanned,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttemptStatus::Succeeded => "succeeded",
            AttemptStatus::Empty => "empty",
            AttemptStatus::Failed => "failed",
            AttemptStatus::SkippedBanned => "skipped-banned",
        };
        f.write_str(s)
    }
}

/// One entry in the append-only audit trail of scraper attempts.
///
/// Audit entries are operator-facing; nothing downstream consumes them.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub scraper_id: String,
    pub status: AttemptStatus,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// A converted plain-text document on disk, ready for indexing.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub source_url: Option<String>,
    pub char_count: usize,
}

/// Metadata describing the semantic-search corpus after upload.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusMetadata {
    /// Platform resource name of the store.
    pub store_name: String,
    /// Human-chosen corpus name.
    pub corpus_name: String,
    pub files_indexed: usize,
    pub estimated_tokens: u64,
    pub cost_estimate_usd: f64,
    pub created_at: DateTime<Utc>,
}
