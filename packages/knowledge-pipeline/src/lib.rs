//! Scraper orchestration pipeline: pick a compliant scraper for a target,
//! run it with automatic fallback, convert the scraped pages to plain-text
//! documents, index them for semantic search, and price the whole run.
//!
//! The library is split in two layers:
//!
//! - Pure logic: [`compliance`] (banned-pattern filter), [`selector`]
//!   (catalog ranking), [`executor`] (fallback state machine), [`pricing`]
//!   (tiered price calculation), [`documents`] (HTML to text), [`report`]
//!   (query guide).
//! - Seams: [`traits`] defines the catalog, runner, indexer, and audit
//!   interfaces; `apify` and `gemini` (behind the cargo features of the same
//!   names) implement them against the real platforms, while [`testing`]
//!   holds in-process mocks.
//!
//! [`pipeline::KnowledgePipeline`] ties the layers together.

pub mod compliance;
pub mod documents;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod pricing;
pub mod report;
pub mod selector;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "apify")]
pub mod apify;
#[cfg(feature = "gemini")]
pub mod gemini;

pub use error::{PipelineError, Result};
pub use pipeline::{KnowledgePipeline, PipelineConfig, PipelineOutput};
pub use selector::{BudgetMode, TargetKind};
pub use types::{CatalogEntry, RunLimits};
