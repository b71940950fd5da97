//! Gemini File Search implementation of the indexer seam.
//!
//! Available behind the `gemini` cargo feature.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use gemini_client::{GeminiClient, GeminiError};

use crate::documents::estimate_indexing_cost;
use crate::error::IndexerError;
use crate::traits::SearchIndexer;
use crate::types::{CorpusMetadata, DocumentFile};

/// Semantic index backed by a Gemini File Search store.
#[derive(Clone)]
pub struct GeminiIndexer {
    client: GeminiClient,
}

impl GeminiIndexer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

fn upload_err(err: GeminiError) -> IndexerError {
    IndexerError::Upload(Box::new(err))
}

#[async_trait]
impl SearchIndexer for GeminiIndexer {
    async fn index_documents(
        &self,
        documents: &[DocumentFile],
        corpus_name: &str,
    ) -> std::result::Result<CorpusMetadata, IndexerError> {
        let store = self
            .client
            .create_store(corpus_name)
            .await
            .map_err(upload_err)?;

        let mut files_indexed = 0;
        for doc in documents {
            let text = std::fs::read_to_string(&doc.path)
                .map_err(|e| IndexerError::Upload(Box::new(e)))?;
            let display_name = doc
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document.txt");

            let uploaded = self
                .client
                .upload_file(display_name, text)
                .await
                .map_err(upload_err)?;
            let operation = self
                .client
                .import_file(&store.name, &uploaded.name)
                .await
                .map_err(upload_err)?;
            self.client
                .wait_for_operation(&operation.name)
                .await
                .map_err(upload_err)?;

            files_indexed += 1;
        }

        info!(store = %store.name, files_indexed, "all documents indexed");

        let estimate = estimate_indexing_cost(documents);
        Ok(CorpusMetadata {
            store_name: store.name,
            corpus_name: corpus_name.to_string(),
            files_indexed,
            estimated_tokens: estimate.estimated_tokens,
            cost_estimate_usd: estimate.cost_usd,
            created_at: Utc::now(),
        })
    }
}
