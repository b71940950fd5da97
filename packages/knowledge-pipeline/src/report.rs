//! Operator-facing query guide for a finished corpus.

use crate::types::CorpusMetadata;

/// Render the Markdown query guide for an uploaded corpus.
///
/// The guide is written next to the converted documents and handed to the
/// operator; nothing in the pipeline reads it back.
pub fn query_guide(corpus: &CorpusMetadata) -> String {
    format!(
        r#"# Query Guide — {corpus_name}

Your knowledge base is ready.

- **Store**: `{store_name}`
- **Files indexed**: {files_indexed}
- **Estimated tokens**: {estimated_tokens}
- **Indexing cost**: ${cost:.4}
- **Created**: {created_at}

## Querying from Python

```python
from google import genai
from google.genai import types

client = genai.Client()
response = client.models.generate_content(
    model="gemini-2.5-flash",
    contents="What does this site say about pricing?",
    config=types.GenerateContentConfig(
        tools=[types.Tool(
            file_search=types.FileSearch(
                file_search_store_names=["{store_name}"]
            )
        )]
    ),
)
print(response.text)
```

The store is persistent and accessible from any device with your API key.
Individual queries cost a fraction of a cent.
"#,
        corpus_name = corpus.corpus_name,
        store_name = corpus.store_name,
        files_indexed = corpus.files_indexed,
        estimated_tokens = corpus.estimated_tokens,
        cost = corpus.cost_estimate_usd,
        created_at = corpus.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn guide_names_the_store_and_file_count() {
        let corpus = CorpusMetadata {
            store_name: "fileSearchStores/abc123".into(),
            corpus_name: "scraped-knowledge".into(),
            files_indexed: 42,
            estimated_tokens: 120_000,
            cost_estimate_usd: 0.018,
            created_at: Utc::now(),
        };

        let guide = query_guide(&corpus);
        assert!(guide.contains("fileSearchStores/abc123"));
        assert!(guide.contains("**Files indexed**: 42"));
        assert!(guide.contains("scraped-knowledge"));
    }
}
