//! Scholar Harvest - Entry Point
//!
//! Thin CLI over the harvesting engine: a single query prints one profile
//! plus its publication records, a batch file fans out over the worker
//! pool. Output is JSON on stdout; downstream exporters consume it as-is.

use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_harvest::batch::flatten_outcomes;
use scholar_harvest::models::SearchQuery;
use scholar_harvest::{BatchOrchestrator, Config, Harvester, Outcome};

#[derive(Parser, Debug)]
#[command(name = "scholar-harvest")]
#[command(about = "Resolve scholar profiles and harvest publication histories")]
#[command(version)]
struct Cli {
    /// Person name to resolve (single-query mode)
    name: Option<String>,

    /// Institution text used to disambiguate the name
    #[arg(long)]
    institution: Option<String>,

    /// Batch file: JSON array of {"name", "institution"?} queries
    #[arg(long, conflicts_with = "name")]
    input: Option<PathBuf>,

    /// Flatten batch output into one publication table with Faculty columns
    #[arg(long, requires = "input")]
    flat: bool,

    /// Page-count ceiling for the publication crawl
    #[arg(long, env = "SCHOLAR_MAX_PAGES")]
    max_pages: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

fn read_batch(path: &PathBuf) -> anyhow::Result<Vec<SearchQuery>> {
    let text = std::fs::read_to_string(path)?;
    let queries: Vec<SearchQuery> = serde_json::from_str(&text)?;
    anyhow::ensure!(!queries.is_empty(), "batch file contains no queries");
    Ok(queries)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env();
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }

    let harvester = Harvester::new(config);

    if let Some(path) = cli.input {
        let queries = read_batch(&path)?;
        tracing::info!(queries = queries.len(), "starting batch harvest");

        let orchestrator = BatchOrchestrator::new(harvester);
        let outcomes = orchestrator.run(queries).await;

        if cli.flat {
            println!("{}", serde_json::to_string_pretty(&flatten_outcomes(&outcomes))?);
        } else {
            let results: Vec<serde_json::Value> = outcomes
                .iter()
                .map(|outcome| match outcome {
                    Outcome::Success { query, record } => json!({
                        "query": query,
                        "profile": record.profile,
                        "results": record.publications,
                    }),
                    Outcome::Failure { query, reason } => json!({
                        "query": query,
                        "error": reason.to_string(),
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        return Ok(());
    }

    let Some(name) = cli.name else {
        anyhow::bail!("provide a name or --input <file>");
    };

    let query = match cli.institution {
        Some(institution) => SearchQuery::with_institution(name, institution),
        None => SearchQuery::new(name),
    };

    match harvester.harvest(&query).await {
        Ok(record) => {
            let out = json!({
                "profile": record.profile,
                "results": record.publications,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            // Distinct from a transport failure: the search worked, nobody
            // matched.
            tracing::warn!(name = %query.name, "no author found");
            println!("{}", json!({ "error": err.to_string() }));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
