//! Conversion of scraped records into plain-text documents.
//!
//! Records come back from the platform as raw JSON; each one is expected to
//! carry the page URL and HTML under configurable field names. The HTML is
//! stripped to readable text with regexes — good enough for a search index,
//! no DOM required — and written as one `.txt` file per page.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::{DocumentFile, ScrapedRecord};

/// Indexing cost per million tokens, in USD.
const INDEXING_COST_PER_MTOK_USD: f64 = 0.15;

/// Rough chars-per-token ratio used for estimates.
const CHARS_PER_TOKEN: u64 = 4;

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>|<noscript[^>]*>.*?</noscript>|<!--.*?-->",
        )
        .expect("block regex is valid")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag regex is valid"))
}

/// Strip an HTML page down to whitespace-normalized text.
pub fn html_to_text(html: &str) -> String {
    let without_blocks = block_re().replace_all(html, " ");
    let without_tags = tag_re().replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the handful of entities that actually show up in page text.
/// `&amp;` goes last so already-decoded `&lt;`/`&gt;` are not re-expanded.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Convert scraped records into text documents under `output_dir`.
///
/// Records without usable HTML (or whose HTML strips to nothing) are skipped
/// with a warning; producing zero documents from a non-empty payload is the
/// caller's error to raise.
pub fn convert_records(
    records: &[ScrapedRecord],
    output_dir: &Path,
    url_field: &str,
    html_field: &str,
) -> std::io::Result<Vec<DocumentFile>> {
    fs::create_dir_all(output_dir)?;

    let mut documents = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let html = record.get(html_field).and_then(|v| v.as_str()).unwrap_or("");
        if html.trim().is_empty() {
            warn!(index = i, field = html_field, "record has no HTML content, skipping");
            continue;
        }

        let text = html_to_text(html);
        if text.is_empty() {
            warn!(index = i, "record stripped to empty text, skipping");
            continue;
        }

        let url = record.get(url_field).and_then(|v| v.as_str());
        let body = match url {
            Some(u) => format!("Source: {u}\n\n{text}\n"),
            None => format!("{text}\n"),
        };

        let path = output_dir.join(format!("doc-{i:04}.txt"));
        fs::write(&path, &body)?;
        debug!(path = %path.display(), chars = body.len(), "wrote document");

        documents.push(DocumentFile {
            path,
            source_url: url.map(str::to_string),
            char_count: body.len(),
        });
    }

    Ok(documents)
}

/// Token and cost estimate for indexing a document set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexingEstimate {
    pub estimated_tokens: u64,
    pub cost_usd: f64,
}

/// Estimate indexing tokens and cost from document sizes.
pub fn estimate_indexing_cost(documents: &[DocumentFile]) -> IndexingEstimate {
    let chars: u64 = documents.iter().map(|d| d.char_count as u64).sum();
    let estimated_tokens = chars / CHARS_PER_TOKEN;
    let cost_usd = estimated_tokens as f64 / 1_000_000.0 * INDEXING_COST_PER_MTOK_USD;
    IndexingEstimate {
        estimated_tokens,
        cost_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_tags_scripts_and_entities() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>alert("nope")</script></head>
            <body><h1>Setup&nbsp;Guide</h1><p>Fast &amp; simple &lt;install&gt;</p>
            <!-- internal note --></body></html>"#;
        let text = html_to_text(html);
        assert_eq!(text, "Setup Guide Fast & simple <install>");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(html_to_text("<p>a</p>\n\n  <p>b</p>"), "a b");
    }

    #[test]
    fn converts_records_and_skips_unusable_ones() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            json!({"url": "https://example.com/a", "html": "<p>alpha</p>"}),
            json!({"url": "https://example.com/b"}),
            json!({"url": "https://example.com/c", "html": "   "}),
            json!({"html": "<p>no url</p>"}),
        ];

        let docs = convert_records(&records, dir.path(), "url", "html").unwrap();
        assert_eq!(docs.len(), 2);

        let first = fs::read_to_string(&docs[0].path).unwrap();
        assert!(first.starts_with("Source: https://example.com/a"));
        assert!(first.contains("alpha"));
        assert_eq!(docs[0].source_url.as_deref(), Some("https://example.com/a"));

        let second = fs::read_to_string(&docs[1].path).unwrap();
        assert!(!second.starts_with("Source:"));
        assert!(second.contains("no url"));
    }

    #[test]
    fn empty_payload_produces_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs = convert_records(&[], dir.path(), "url", "html").unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn cost_estimate_scales_with_document_size() {
        let doc = |chars: usize| DocumentFile {
            path: "doc.txt".into(),
            source_url: None,
            char_count: chars,
        };

        let estimate = estimate_indexing_cost(&[doc(4_000_000)]);
        assert_eq!(estimate.estimated_tokens, 1_000_000);
        assert!((estimate.cost_usd - INDEXING_COST_PER_MTOK_USD).abs() < 1e-9);

        let nothing = estimate_indexing_cost(&[]);
        assert_eq!(nothing.estimated_tokens, 0);
        assert_eq!(nothing.cost_usd, 0.0);
    }
}
