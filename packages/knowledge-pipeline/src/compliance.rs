//! Banned-scraper compliance filter.
//!
//! Certain catalog categories — social media, major e-commerce platforms,
//! search engines, B2B data brokers — may not be scraped through this
//! pipeline. Matching is deliberately simple: lowercase substring containment
//! over the concatenated id, title, and description of a catalog entry.
//! Compliance correctness rests on the pattern table being easy to review by
//! a human, not on matching sophistication; the matcher never changes when a
//! pattern is added.

use std::sync::OnceLock;

use crate::types::CatalogEntry;

/// Category a banned pattern belongs to. Metadata for maintainers only:
/// matching always runs against the flattened set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCategory {
    SocialMedia,
    Ecommerce,
    SearchEngine,
    B2bData,
}

/// The banned-pattern table. Patterns must be lowercase and specific enough
/// to avoid false positives on ordinary words: a bare "face" or "x" would
/// also match "interface-scraper" or "xml-scraper", so only the full-word or
/// hyphenated forms are listed.
const BANNED_PATTERN_TABLE: &[(&str, PatternCategory)] = &[
    ("instagram", PatternCategory::SocialMedia),
    ("facebook", PatternCategory::SocialMedia),
    ("tiktok", PatternCategory::SocialMedia),
    ("linkedin", PatternCategory::SocialMedia),
    ("twitter", PatternCategory::SocialMedia),
    ("x-scraper", PatternCategory::SocialMedia),
    ("youtube", PatternCategory::SocialMedia),
    ("amazon", PatternCategory::Ecommerce),
    ("amz-", PatternCategory::Ecommerce),
    ("google-maps", PatternCategory::SearchEngine),
    ("google-search", PatternCategory::SearchEngine),
    ("google-trends", PatternCategory::SearchEngine),
    ("apollo", PatternCategory::B2bData),
    ("apollo-io", PatternCategory::B2bData),
];

/// The flattened pattern set, built once per process and never mutated.
pub fn banned_patterns() -> &'static [&'static str] {
    static FLAT: OnceLock<Vec<&'static str>> = OnceLock::new();
    FLAT.get_or_init(|| BANNED_PATTERN_TABLE.iter().map(|(p, _)| *p).collect())
}

/// Returns true when any banned pattern occurs anywhere in the entry's id,
/// title, or description (case-insensitive). Missing fields are treated as
/// empty strings; an entry with no text is never banned.
pub fn is_banned(entry: &CatalogEntry) -> bool {
    let haystack = format!(
        "{} {} {}",
        entry.id,
        entry.title.as_deref().unwrap_or(""),
        entry.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    banned_patterns().iter().any(|p| haystack.contains(p))
}

/// Order-preserving subsequence of `entries` that pass the compliance filter.
/// Idempotent: filtering an already-filtered list is a no-op.
pub fn filter_allowed(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    entries.into_iter().filter(|e| !is_banned(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry::new(id)
    }

    #[test]
    fn social_media_scrapers_are_banned() {
        for id in [
            "apify/instagram-scraper",
            "apify/instagram-posts-scraper",
            "apify/facebook-posts",
            "apify/facebook-pages-scraper",
            "apify/tiktok-scraper",
            "apify/linkedin-profile-scraper",
            "epctex/linkedin-jobs-scraper",
            "apify/twitter-scraper",
            "apify/x-scraper",
            "apify/youtube-scraper",
            "apify/youtube-channel-scraper",
        ] {
            assert!(is_banned(&entry(id)), "{id} should be banned");
        }
    }

    #[test]
    fn ecommerce_scrapers_are_banned() {
        for id in [
            "apify/amazon-scraper",
            "apify/amazon-products-scraper",
            "apify/amazon-reviews-scraper",
            "apify/amz-product-scraper",
        ] {
            assert!(is_banned(&entry(id)), "{id} should be banned");
        }
    }

    #[test]
    fn search_engine_scrapers_are_banned() {
        for id in [
            "apify/google-maps-scraper",
            "apify/google-search-scraper",
            "apify/google-trends-scraper",
        ] {
            assert!(is_banned(&entry(id)), "{id} should be banned");
        }
    }

    #[test]
    fn b2b_scrapers_are_banned() {
        assert!(is_banned(&entry("apify/apollo-scraper")));
        assert!(is_banned(&entry("apify/apollo-io-scraper")));
    }

    #[test]
    fn general_scrapers_are_allowed() {
        for id in [
            "apify/web-scraper",
            "apify/cheerio-scraper",
            "apify/puppeteer-scraper",
            "apify/playwright-scraper",
            "apify/beautifulsoup-scraper",
            "apify/reddit-scraper",
            "apify/github-scraper",
            "apify/hacker-news-scraper",
            "apify/documentation-scraper",
            "apify/blog-scraper",
            "apify/news-article-scraper",
            "epctex/smart-web-scraper",
        ] {
            assert!(!is_banned(&entry(id)), "{id} should be allowed");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_banned(&entry("APIFY/INSTAGRAM-SCRAPER")));
        assert!(is_banned(&entry("apify/FaceBook-Scraper")));
        assert_eq!(
            is_banned(&entry("X/INSTAGRAM-SCRAPER")),
            is_banned(&entry("x/instagram-scraper")),
        );
    }

    #[test]
    fn banned_pattern_in_title_is_detected() {
        let e = entry("apify/web-scraper").with_title("Instagram Data Extractor");
        assert!(is_banned(&e));
    }

    #[test]
    fn banned_pattern_in_description_is_detected() {
        let e = entry("apify/web-scraper")
            .with_title("Web Scraper")
            .with_description("Scrape data from Amazon product pages");
        assert!(is_banned(&e));
    }

    #[test]
    fn pattern_fragments_do_not_match() {
        // "face" is not "facebook"
        assert!(!is_banned(&entry("apify/interface-scraper")));
        // "linked" is not "linkedin"
        assert!(!is_banned(&entry("apify/linked-data-scraper")));
    }

    #[test]
    fn hyphenated_patterns_need_the_hyphen() {
        assert!(is_banned(&entry("apify/google-maps-scraper")));
        // "googlemaps" does not contain "google-maps"
        assert!(!is_banned(&entry("apify/googlemaps")));
    }

    #[test]
    fn empty_entry_is_not_banned() {
        assert!(!is_banned(&CatalogEntry::default()));
    }

    #[test]
    fn missing_fields_never_panic() {
        assert!(!is_banned(&entry("apify/web-scraper")));
        let title_only = CatalogEntry::default().with_title("Web Scraper");
        assert!(!is_banned(&title_only));
    }

    #[test]
    fn every_pattern_matches_a_plain_id() {
        for pattern in banned_patterns() {
            let e = entry(&format!("vendor/{pattern}scraper"));
            assert!(is_banned(&e), "pattern {pattern} failed to match");
        }
    }

    #[test]
    fn filter_keeps_all_allowed() {
        let entries = vec![
            entry("apify/web-scraper"),
            entry("apify/cheerio-scraper"),
            entry("apify/reddit-scraper"),
        ];
        assert_eq!(filter_allowed(entries).len(), 3);
    }

    #[test]
    fn filter_drops_all_banned() {
        let entries = vec![
            entry("apify/instagram-scraper"),
            entry("apify/facebook-scraper"),
            entry("apify/amazon-scraper"),
        ];
        assert!(filter_allowed(entries).is_empty());
    }

    #[test]
    fn filter_preserves_order_of_allowed() {
        let entries = vec![
            entry("apify/web-scraper"),
            entry("apify/instagram-scraper"),
            entry("apify/cheerio-scraper"),
            entry("apify/amazon-scraper"),
            entry("apify/reddit-scraper"),
        ];
        let allowed = filter_allowed(entries);
        let ids: Vec<&str> = allowed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            ["apify/web-scraper", "apify/cheerio-scraper", "apify/reddit-scraper"]
        );
        assert!(allowed.iter().all(|e| !is_banned(e)));
    }

    #[test]
    fn filter_handles_empty_list() {
        assert!(filter_allowed(Vec::new()).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let entries = vec![
            entry("apify/web-scraper"),
            entry("apify/instagram-scraper"),
            entry("apify/cheerio-scraper"),
        ];
        let once = filter_allowed(entries);
        let twice = filter_allowed(once.clone());
        assert_eq!(once, twice);
    }
}
