//! Pure Gemini File Search REST API client.
//!
//! A minimal client for building semantic-search corpora on the Gemini
//! platform: create a file search store, upload text documents, import them
//! into the store, and poll the resulting long-running operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new("your-api-key".into());
//!
//! let store = client.create_store("scraped-knowledge").await?;
//! let file = client.upload_file("doc-0001.txt", text).await?;
//! let op = client.import_file(&store.name, &file.name).await?;
//! client.wait_for_operation(&op.name).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{FileSearchStore, Operation, UploadedFile};

use std::time::Duration;

use types::{CreateStoreRequest, ImportFileRequest, UploadResponse};

const BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Delay between operation polls.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Upper bound on operation polls before giving up.
const MAX_POLLS: u32 = 150;

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Create a file search store to hold indexed documents.
    pub async fn create_store(&self, display_name: &str) -> Result<FileSearchStore> {
        let url = format!("{}/v1beta/fileSearchStores", BASE_URL);
        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&CreateStoreRequest {
                display_name: display_name.to_string(),
            })
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let store: FileSearchStore = decode(resp).await?;
        tracing::info!(store = %store.name, "Created file search store");
        Ok(store)
    }

    /// Upload a plain-text document via the media upload endpoint.
    pub async fn upload_file(&self, display_name: &str, text: String) -> Result<UploadedFile> {
        let url = format!("{}/upload/v1beta/files", BASE_URL);
        let resp = self
            .client
            .post(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("uploadType", "media"),
            ])
            .header("Content-Type", "text/plain")
            .header("X-Goog-File-Name", display_name)
            .body(text)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let upload: UploadResponse = decode(resp).await?;
        tracing::debug!(file = %upload.file.name, display_name, "Uploaded file");
        Ok(upload.file)
    }

    /// Import an uploaded file into a store. Returns the pending operation.
    pub async fn import_file(&self, store_name: &str, file_name: &str) -> Result<Operation> {
        let url = format!("{}/v1beta/{}:importFile", BASE_URL, store_name);
        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&ImportFileRequest {
                file_name: file_name.to_string(),
            })
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        decode(resp).await
    }

    /// Poll a long-running operation until it finishes.
    pub async fn wait_for_operation(&self, operation_name: &str) -> Result<Operation> {
        for _ in 0..MAX_POLLS {
            let url = format!("{}/v1beta/{}", BASE_URL, operation_name);
            let resp = self
                .client
                .get(&url)
                .query(&[("key", self.api_key.as_str())])
                .send()
                .await
                .map_err(|e| GeminiError::Network(e.to_string()))?;

            let operation: Operation = decode(resp).await?;
            if operation.done {
                if let Some(err) = &operation.error {
                    return Err(GeminiError::Api(err.message.clone()));
                }
                return Ok(operation);
            }

            tracing::debug!(operation = %operation.name, "Operation still running");
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(GeminiError::Api(format!(
            "operation {} did not finish in time",
            operation_name
        )))
    }
}

/// Decode a response, mapping non-2xx statuses and bad JSON to errors.
async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(GeminiError::Api(format!("{}: {}", status, body)));
    }
    resp.json().await.map_err(|e| GeminiError::Parse(e.to_string()))
}
