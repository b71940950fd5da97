//! Catalog ranking and scraper selection.
//!
//! Turns a raw catalog search into an ordered candidate list: classify the
//! target, query the catalog, strip banned workers, rank the survivors by the
//! budget preference, and keep the top N (one primary plus fallbacks). The
//! returned list is guaranteed free of banned entries at selection time; the
//! executor re-checks anyway before each attempt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compliance::filter_allowed;
use crate::error::SelectError;
use crate::traits::ScraperCatalog;
use crate::types::CatalogEntry;

/// How many listings to pull from the catalog before filtering. Larger than
/// any sensible `top_n` so the compliance filter has room to drop entries.
const CATALOG_FETCH_LIMIT: usize = 50;

/// Price assumed for listings that do not publish one, in USD.
const DEFAULT_PRICE_USD: f64 = 0.01;

/// Coarse classification of the scrape target. Drives the catalog search
/// term and shows up in reports; it never affects compliance filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Documentation,
    Ecommerce,
    News,
    Social,
    General,
}

impl TargetKind {
    /// Search term used against the catalog for this kind of target.
    ///
    /// Social targets still search for a general-purpose scraper: dedicated
    /// social-media actors are banned, so there is no point asking for them.
    pub fn search_term(self) -> &'static str {
        match self {
            TargetKind::Documentation => "documentation website scraper",
            TargetKind::Ecommerce => "e-commerce website scraper",
            TargetKind::News => "news article scraper",
            TargetKind::Social | TargetKind::General => "web scraper",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::Documentation => "documentation",
            TargetKind::Ecommerce => "e-commerce",
            TargetKind::News => "news",
            TargetKind::Social => "social",
            TargetKind::General => "general",
        };
        f.write_str(s)
    }
}

/// Classify a target URL or resource identifier into a coarse category.
pub fn classify_target(target: &str) -> TargetKind {
    let t = target.to_lowercase();

    if ["docs.", "/docs", "documentation", "wiki.", "/wiki", "readthedocs"]
        .iter()
        .any(|k| t.contains(k))
    {
        return TargetKind::Documentation;
    }
    if ["twitter.com", "x.com", "facebook.com", "instagram.com", "tiktok.com", "linkedin.com"]
        .iter()
        .any(|k| t.contains(k))
    {
        return TargetKind::Social;
    }
    if ["shop", "store.", "/store", "/product", "/cart", "/checkout"]
        .iter()
        .any(|k| t.contains(k))
    {
        return TargetKind::Ecommerce;
    }
    if ["news", "blog", "/article", "press."].iter().any(|k| t.contains(k)) {
        return TargetKind::News;
    }
    TargetKind::General
}

/// How to trade cost against quality when ranking candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// Cheapest first.
    Cheapest,
    /// Best popularity-per-dollar first.
    #[default]
    Optimal,
    /// Most proven first, price ignored.
    BestQuality,
}

impl FromStr for BudgetMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cheapest" => Ok(BudgetMode::Cheapest),
            "optimal" => Ok(BudgetMode::Optimal),
            "best_quality" | "best-quality" => Ok(BudgetMode::BestQuality),
            other => Err(format!("unknown budget mode: {other}")),
        }
    }
}

impl fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BudgetMode::Cheapest => "cheapest",
            BudgetMode::Optimal => "optimal",
            BudgetMode::BestQuality => "best_quality",
        };
        f.write_str(s)
    }
}

/// An ordered candidate list plus the classification it was built for.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Primary candidate first, then fallbacks. Never contains a banned
    /// entry; may be shorter than the requested `top_n`.
    pub candidates: Vec<CatalogEntry>,
    pub target_kind: TargetKind,
}

fn price_of(entry: &CatalogEntry) -> f64 {
    // Floor keeps the popularity-per-price ratio finite for free actors.
    entry.price_per_unit_usd.unwrap_or(DEFAULT_PRICE_USD).max(0.001)
}

fn popularity_of(entry: &CatalogEntry) -> f64 {
    entry.monthly_users.unwrap_or(0) as f64
}

/// Sort candidates into the budget preference's total order. Ties break on
/// id so the order is deterministic for equal scores.
fn rank(entries: &mut [CatalogEntry], budget: BudgetMode) {
    match budget {
        BudgetMode::Cheapest => entries.sort_by(|a, b| {
            price_of(a)
                .total_cmp(&price_of(b))
                .then_with(|| a.id.cmp(&b.id))
        }),
        BudgetMode::BestQuality => entries.sort_by(|a, b| {
            popularity_of(b)
                .total_cmp(&popularity_of(a))
                .then_with(|| a.id.cmp(&b.id))
        }),
        BudgetMode::Optimal => entries.sort_by(|a, b| {
            let score_a = popularity_of(a) / price_of(a);
            let score_b = popularity_of(b) / price_of(b);
            score_b.total_cmp(&score_a).then_with(|| a.id.cmp(&b.id))
        }),
    }
}

/// Query the catalog, drop banned workers, rank by budget preference, and
/// keep the best `top_n` (primary plus fallbacks).
///
/// Fewer than `top_n` eligible workers is fine — the list is returned as-is,
/// never padded. Zero eligible workers is a hard error.
pub async fn select_scrapers<C: ScraperCatalog>(
    catalog: &C,
    target: &str,
    budget: BudgetMode,
    top_n: usize,
) -> std::result::Result<Selection, SelectError> {
    let target_kind = classify_target(target);
    info!(target, kind = %target_kind, "classified scrape target");

    let listed = catalog.search(target_kind, CATALOG_FETCH_LIMIT).await?;
    let total = listed.len();

    let mut allowed = filter_allowed(listed);
    info!(
        total,
        allowed = allowed.len(),
        banned = total - allowed.len(),
        "applied compliance filter to catalog results"
    );

    if allowed.is_empty() {
        return Err(SelectError::NoEligibleScraper { target_kind });
    }

    rank(&mut allowed, budget);
    allowed.truncate(top_n);
    info!(candidates = allowed.len(), budget = %budget, "ranked scraper candidates");

    Ok(Selection {
        candidates: allowed,
        target_kind,
    })
}
