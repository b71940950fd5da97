//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports searching the actor
//! store, starting actor runs, polling for completion, and fetching dataset
//! results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, StartUrl, WebScraperRunInput};
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let input = WebScraperRunInput {
//!     start_urls: vec![StartUrl { url: "https://example.com".into() }],
//!     max_pages_per_crawl: 100,
//!     max_concurrency: 5,
//! };
//! let pages = client.call_actor("apify/web-scraper", &input).await?;
//! println!("scraped {} pages", pages.len());
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    ActorStats, PricingInfo, RunData, StartUrl, StoreActor, WebScraperRunInput,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::{ApiResponse, PaginatedList};

const BASE_URL: &str = "https://api.apify.com/v2";

#[derive(Clone)]
pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
        }
    }

    /// Search the actor store. Returns up to `limit` catalog listings
    /// matching the query, most relevant first.
    pub async fn search_store(&self, query: &str, limit: usize) -> Result<Vec<StoreActor>> {
        let url = format!("{}/store", BASE_URL);
        let resp = self
            .client
            .get(&url)
            .query(&[("search", query), ("limit", &limit.to_string())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<PaginatedList<StoreActor>> = resp.json().await?;
        Ok(api_resp.data.items)
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_actor_run<I: Serialize>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", BASE_URL, actor_path(actor_id));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", BASE_URL, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(api_resp.data.status));
                }
                _ => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", BASE_URL, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Run an actor end-to-end: start run, poll, fetch results.
    pub async fn call_actor<I: Serialize>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<Vec<serde_json::Value>> {
        tracing::info!(actor_id, "Starting actor run");

        let run = self.start_actor_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let items: Vec<serde_json::Value> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = items.len(), "Fetched dataset items");

        Ok(items)
    }
}

/// Public actor ids use `username/actor-name`; the REST path wants a tilde.
fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}
