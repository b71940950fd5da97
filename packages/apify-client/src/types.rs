use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Paginated payload returned by Apify list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

/// An actor listed in the Apify Store catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreActor {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub stats: Option<ActorStats>,
    #[serde(rename = "currentPricingInfo")]
    pub pricing: Option<PricingInfo>,
}

/// Usage statistics attached to a store listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActorStats {
    #[serde(rename = "totalUsers30Days")]
    pub total_users_30_days: Option<u64>,
}

/// Pricing attached to a store listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingInfo {
    #[serde(rename = "pricePerUnitUsd")]
    pub price_per_unit_usd: Option<f64>,
}

/// Run input understood by the general-purpose crawling actors this client
/// drives (apify/web-scraper, apify/cheerio-scraper and friends).
#[derive(Debug, Clone, Serialize)]
pub struct WebScraperRunInput {
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
    #[serde(rename = "maxPagesPerCrawl")]
    pub max_pages_per_crawl: u32,
    #[serde(rename = "maxConcurrency")]
    pub max_concurrency: u32,
}

/// A crawl start URL.
#[derive(Debug, Clone, Serialize)]
pub struct StartUrl {
    pub url: String,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
