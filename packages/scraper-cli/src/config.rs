use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Platform credentials loaded from environment variables
#[derive(Debug, Clone)]
pub struct Credentials {
    pub apify_token: String,
    pub gemini_api_key: String,
}

impl Credentials {
    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            apify_token: env::var("APIFY_TOKEN").context("APIFY_TOKEN must be set")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
        })
    }
}
