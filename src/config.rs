use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Where listings come from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    MlsApi {
        base_url: String,
        api_key: Option<String>,
    },
    Fixture {
        path: PathBuf,
    },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when neither an API nor a fixture is configured
    pub source: Option<SourceConfig>,
    pub saved_searches_path: PathBuf,
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = match (var("LISTINGS_API_URL"), var("LISTINGS_FIXTURE")) {
            (Some(base_url), _) => Some(SourceConfig::MlsApi {
                base_url,
                api_key: var("LISTINGS_API_KEY"),
            }),
            (None, Some(path)) => Some(SourceConfig::Fixture { path: path.into() }),
            (None, None) => None,
        };

        Ok(Self {
            source,
            saved_searches_path: var("SAVED_SEARCHES_PATH")
                .unwrap_or_else(|| "saved_searches.json".to_string())
                .into(),
            page_size: var("PAGE_SIZE")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("PAGE_SIZE must be a valid number")?
                .unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}
