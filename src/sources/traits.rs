use crate::criteria::SearchCriteria;
use crate::models::ListingPage;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing backends
/// The MLS API in production, a JSON fixture for demos and tests
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page (1-based) of listings matching the criteria
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<ListingPage>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
