use crate::criteria::{sort_listings, SearchCriteria};
use crate::models::{Listing, ListingPage};
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// Listings held in memory, filtered and sorted locally
pub struct FixtureSource {
    listings: Vec<Listing>,
    page_size: u32,
}

impl FixtureSource {
    pub fn new(listings: Vec<Listing>, page_size: u32) -> Self {
        Self {
            listings,
            page_size: page_size.max(1),
        }
    }

    /// Load a JSON array of listings
    pub async fn load(path: impl AsRef<Path>, page_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read listings fixture {}", path.display()))?;
        let listings: Vec<Listing> =
            serde_json::from_str(&json).context("Failed to parse listings fixture")?;

        info!("Loaded {} listings from {}", listings.len(), path.display());
        Ok(Self::new(listings, page_size))
    }
}

#[async_trait]
impl ListingSource for FixtureSource {
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<ListingPage> {
        let mut matched: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| criteria.matches(l))
            .cloned()
            .collect();
        sort_listings(&mut matched, criteria.sort);

        let page = page.max(1);
        let total = matched.len();
        let listings = matched
            .into_iter()
            .skip((page as usize - 1) * self.page_size as usize)
            .take(self.page_size as usize)
            .collect();

        Ok(ListingPage {
            listings,
            total,
            page,
            page_size: self.page_size,
        })
    }

    fn source_name(&self) -> &'static str {
        "Fixture"
    }
}
