//! Tiered pricing for a completed pipeline run.
//!
//! Pure arithmetic over the page count and the indexing estimate. The tier
//! table and fees mirror the published pricing sheet; totals are rounded to
//! the nearest fifty cents and never drop below the minimum charge.

use std::fmt;

use serde::Serialize;

/// Flat platform fee charged on every run, in USD.
const BASE_FEE_USD: f64 = 8.00;

/// Minimum total charge, in USD.
const MINIMUM_CHARGE_USD: f64 = 10.00;

/// Scraping volume tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Simple,
    Medium,
    Large,
    Massive,
}

impl PricingTier {
    /// Tier for a given number of scraped pages.
    pub fn for_pages(pages: usize) -> Self {
        match pages {
            0..=50 => PricingTier::Simple,
            51..=200 => PricingTier::Medium,
            201..=500 => PricingTier::Large,
            _ => PricingTier::Massive,
        }
    }

    /// Scraping fee for this tier, in USD.
    pub fn scraper_fee_usd(self) -> f64 {
        match self {
            PricingTier::Simple => 2.00,
            PricingTier::Medium => 5.00,
            PricingTier::Large => 10.00,
            PricingTier::Massive => 15.00,
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PricingTier::Simple => "simple",
            PricingTier::Medium => "medium",
            PricingTier::Large => "large",
            PricingTier::Massive => "massive",
        };
        f.write_str(s)
    }
}

/// Itemized price for one run.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    pub base_fee_usd: f64,
    pub tier: PricingTier,
    pub scraper_fee_usd: f64,
    pub indexing_fee_usd: f64,
    pub total_usd: f64,
}

/// Price a run: base fee + tier fee + indexing cost, rounded to the nearest
/// $0.50, floored at the minimum charge.
pub fn price_run(pages_scraped: usize, indexing_fee_usd: f64) -> PriceBreakdown {
    let tier = PricingTier::for_pages(pages_scraped);
    let scraper_fee_usd = tier.scraper_fee_usd();

    let raw = BASE_FEE_USD + scraper_fee_usd + indexing_fee_usd;
    let rounded = (raw * 2.0).round() / 2.0;
    let total_usd = rounded.max(MINIMUM_CHARGE_USD);

    PriceBreakdown {
        base_fee_usd: BASE_FEE_USD,
        tier,
        scraper_fee_usd,
        indexing_fee_usd,
        total_usd,
    }
}
