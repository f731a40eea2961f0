pub mod fixture;
pub mod mls;
pub mod traits;

pub use fixture::FixtureSource;
pub use mls::MlsApiSource;
pub use traits::ListingSource;

use crate::config::{Config, SourceConfig};
use anyhow::Result;

/// Open the listing source named by the configuration
pub async fn from_config(config: &Config) -> Result<Box<dyn ListingSource>> {
    match &config.source {
        Some(SourceConfig::MlsApi { base_url, api_key }) => Ok(Box::new(MlsApiSource::new(
            base_url,
            api_key.clone(),
            config.page_size,
        )?)),
        Some(SourceConfig::Fixture { path }) => {
            Ok(Box::new(FixtureSource::load(path, config.page_size).await?))
        }
        None => anyhow::bail!("Either LISTINGS_API_URL or LISTINGS_FIXTURE must be set"),
    }
}
