use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listing_search::compare::{compute_best_values, default_field_specs};
use listing_search::config::Config;
use listing_search::criteria::{from_query_string, to_query_string, SearchCriteria};
use listing_search::models::{Listing, ListingSummary};
use listing_search::sources;
use listing_search::store::{JsonFileStore, SearchStore};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-search", about = "Property search criteria and comparison tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the canonical form of a search query string
    Normalize { query: String },
    /// Run a search against the configured listing source
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Also write the results to this JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Highlight best values across listings from a JSON file
    Compare {
        listings: PathBuf,
        /// Only compare these MLS ids
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Save a search under a key
    Save { key: String, query: String },
    /// Print a saved search as a query string
    Load { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Normalize { query } => normalize(&query)?,
        Command::Search {
            query,
            page,
            output,
        } => search(&config, &query, page, output).await?,
        Command::Compare { listings, ids } => compare(listings, &ids).await?,
        Command::Save { key, query } => {
            let store = JsonFileStore::new(&config.saved_searches_path);
            let saved = store.save(&key, &from_query_string(&query)).await?;
            println!("{}", to_query_string(&saved.criteria));
        }
        Command::Load { key } => {
            let store = JsonFileStore::new(&config.saved_searches_path);
            match store.load(&key).await? {
                Some(saved) => {
                    info!("Loaded '{}' saved at {}", saved.key, saved.saved_at);
                    println!("{}", to_query_string(&saved.criteria));
                }
                None => warn!("No saved search named '{}'", key),
            }
        }
    }

    Ok(())
}

fn normalize(query: &str) -> Result<()> {
    let criteria = from_query_string(query);

    println!("{}", serde_json::to_string_pretty(&criteria)?);
    println!("?{}", to_query_string(&criteria));
    for warning in criteria.warnings() {
        println!("⚠️  {}", warning);
    }

    Ok(())
}

async fn search(config: &Config, query: &str, page: u32, output: Option<PathBuf>) -> Result<()> {
    let source = sources::from_config(config).await?;
    let criteria: SearchCriteria = from_query_string(query);

    info!("🏠 Searching {} (page {})", source.source_name(), page);
    let results = source.search(&criteria, page).await?;

    info!("✅ Found {} listings\n", results.total);
    for (i, listing) in results.listings.iter().enumerate() {
        println!("{}. {} ({})", i + 1, listing.address.one_line(), price_label(listing.price));
        println!(
            "   {} bd, {} ba, {} sqft",
            opt_label(listing.beds.map(f64::from)),
            opt_label(listing.baths),
            opt_label(listing.sqft)
        );
        println!("   {} · {}", listing.property_type, listing.status);
        println!("   MLS: {}", listing.mls_id);
        println!();
    }
    if results.has_more() {
        info!("More results on page {}", results.page + 1);
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(&path, json).await?;
        info!("💾 Saved results to {}", path.display());
    }

    Ok(())
}

async fn compare(path: PathBuf, ids: &[String]) -> Result<()> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let listings: Vec<Listing> = serde_json::from_str(&json).context("Failed to parse listings")?;

    let summaries: Vec<ListingSummary> = listings
        .iter()
        .filter(|l| ids.is_empty() || ids.contains(&l.mls_id))
        .map(ListingSummary::from)
        .collect();

    let best = compute_best_values(&summaries, &default_field_specs());
    for (i, summary) in summaries.iter().enumerate() {
        let wins: Vec<&str> = best
            .iter()
            .filter(|(_, mask)| mask[i])
            .map(|(field, _)| field)
            .collect();
        println!("{} {}", summary.mls_id, summary.address);
        println!("   best: {}", if wins.is_empty() { "-".to_string() } else { wins.join(", ") });
    }

    Ok(())
}

fn price_label(price: Option<f64>) -> String {
    price.map_or_else(|| "N/A".to_string(), |p| format!("${:.0}", p))
}

fn opt_label(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
