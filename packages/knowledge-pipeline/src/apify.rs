//! Apify-backed implementations of the catalog and runner seams.
//!
//! Available behind the `apify` cargo feature.

use async_trait::async_trait;

use apify_client::{ApifyClient, StartUrl, StoreActor, WebScraperRunInput};

use crate::error::{RunnerError, SelectError};
use crate::selector::TargetKind;
use crate::traits::{ScraperCatalog, ScraperRunner};
use crate::types::{CatalogEntry, RunLimits, ScrapedRecord};

/// Catalog and execution platform backed by Apify. Clone freely: the inner
/// client shares one connection pool.
#[derive(Clone)]
pub struct ApifyPlatform {
    client: ApifyClient,
}

impl ApifyPlatform {
    pub fn new(client: ApifyClient) -> Self {
        Self { client }
    }
}

impl From<StoreActor> for CatalogEntry {
    fn from(actor: StoreActor) -> Self {
        // Store listings are addressed as "username/name"; fall back to the
        // opaque actor id when either half is missing.
        let id = match (&actor.username, &actor.name) {
            (Some(username), Some(name)) => format!("{username}/{name}"),
            _ => actor.id.clone(),
        };
        CatalogEntry {
            id,
            title: actor.title,
            description: actor.description,
            price_per_unit_usd: actor.pricing.and_then(|p| p.price_per_unit_usd),
            monthly_users: actor.stats.and_then(|s| s.total_users_30_days),
        }
    }
}

#[async_trait]
impl ScraperCatalog for ApifyPlatform {
    async fn search(
        &self,
        kind: TargetKind,
        limit: usize,
    ) -> std::result::Result<Vec<CatalogEntry>, SelectError> {
        let actors = self
            .client
            .search_store(kind.search_term(), limit)
            .await
            .map_err(|e| SelectError::Catalog(Box::new(e)))?;
        Ok(actors.into_iter().map(CatalogEntry::from).collect())
    }
}

#[async_trait]
impl ScraperRunner for ApifyPlatform {
    async fn run(
        &self,
        scraper_id: &str,
        target: &str,
        limits: &RunLimits,
    ) -> std::result::Result<Vec<ScrapedRecord>, RunnerError> {
        let input = WebScraperRunInput {
            start_urls: vec![StartUrl {
                url: target.to_string(),
            }],
            max_pages_per_crawl: limits.max_pages,
            max_concurrency: limits.max_concurrency,
        };

        self.client
            .call_actor(scraper_id, &input)
            .await
            .map_err(|e| RunnerError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_actor_maps_to_catalog_entry() {
        let actor = StoreActor {
            id: "abc123".into(),
            name: Some("web-scraper".into()),
            username: Some("apify".into()),
            title: Some("Web Scraper".into()),
            description: Some("Crawls arbitrary websites".into()),
            stats: Some(apify_client::ActorStats {
                total_users_30_days: Some(52_000),
            }),
            pricing: Some(apify_client::PricingInfo {
                price_per_unit_usd: Some(0.25),
            }),
        };

        let entry = CatalogEntry::from(actor);
        assert_eq!(entry.id, "apify/web-scraper");
        assert_eq!(entry.title.as_deref(), Some("Web Scraper"));
        assert_eq!(entry.price_per_unit_usd, Some(0.25));
        assert_eq!(entry.monthly_users, Some(52_000));
    }

    #[test]
    fn opaque_id_is_used_when_the_public_name_is_incomplete() {
        let actor = StoreActor {
            id: "abc123".into(),
            username: Some("apify".into()),
            ..Default::default()
        };
        assert_eq!(CatalogEntry::from(actor).id, "abc123");
    }
}
