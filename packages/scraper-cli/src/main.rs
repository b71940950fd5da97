// Command-line entry point for the knowledge pipeline

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apify_client::ApifyClient;
use gemini_client::GeminiClient;
use knowledge_pipeline::apify::ApifyPlatform;
use knowledge_pipeline::gemini::GeminiIndexer;
use knowledge_pipeline::{BudgetMode, KnowledgePipeline, PipelineConfig, RunLimits};

use config::Credentials;

/// Scrape a website into a queryable semantic knowledge base
#[derive(Debug, Parser)]
#[command(name = "scrape", version)]
struct Args {
    /// Target URL or resource identifier to scrape
    target: String,

    /// Budget preference: cheapest, optimal, or best_quality
    #[arg(long, default_value = "optimal")]
    budget: BudgetMode,

    /// Maximum pages per crawl
    #[arg(long, default_value_t = 100)]
    max_pages: u32,

    /// How many scraper candidates to keep (one primary plus fallbacks)
    #[arg(long, default_value_t = 3)]
    top_n: usize,

    /// Name for the semantic-search corpus
    #[arg(long, default_value = "scraped-knowledge")]
    corpus_name: String,

    /// Directory for converted documents and the query guide
    #[arg(long, default_value = "documents")]
    output_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,knowledge_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let credentials = Credentials::from_env().context("Failed to load credentials")?;

    let platform = ApifyPlatform::new(ApifyClient::new(credentials.apify_token));
    let indexer = GeminiIndexer::new(GeminiClient::new(credentials.gemini_api_key));

    let pipeline_config = PipelineConfig::new(&args.target)
        .with_budget(args.budget)
        .with_top_n(args.top_n)
        .with_limits(RunLimits::default().with_max_pages(args.max_pages))
        .with_corpus_name(&args.corpus_name)
        .with_output_dir(&args.output_dir);

    let pipeline =
        KnowledgePipeline::new(platform.clone(), platform, indexer, pipeline_config);
    let output = pipeline.run().await.context("Pipeline run failed")?;

    println!();
    println!("Knowledge base ready");
    println!("  Target:      {} ({})", output.target, output.target_kind);
    println!("  Scraper:     {}", output.scraper_used);
    println!("  Pages:       {}", output.pages_scraped);
    println!("  Documents:   {}", output.documents_created);
    println!("  Store:       {}", output.corpus.store_name);
    println!("  Est. tokens: {}", output.corpus.estimated_tokens);
    println!(
        "  Price:       ${:.2} ({} tier)",
        output.pricing.total_usd, output.pricing.tier
    );
    println!("  Query guide: {}", output.query_guide_path.display());

    Ok(())
}
