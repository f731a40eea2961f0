use crate::criteria::{to_query_params, SearchCriteria};
use crate::models::ListingPage;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Listings search against the MLS REST API
pub struct MlsApiSource {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    page_size: u32,
}

impl MlsApiSource {
    /// Create a source for the API rooted at `base_url`
    pub fn new(base_url: &str, api_key: Option<String>, page_size: u32) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("Invalid listings API URL: {}", base_url))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("listings").context("Failed to build listings endpoint")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("listing-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            page_size,
        })
    }

    /// The GET request for one page; criteria params go on the URL unchanged
    fn request(&self, criteria: &SearchCriteria, page: u32) -> Result<Request> {
        let mut params = to_query_params(criteria);
        params.push(("page", page.max(1).to_string()));
        params.push(("limit", self.page_size.to_string()));

        let mut builder = self.client.get(self.endpoint.clone()).query(&params);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        builder.build().context("Failed to build listings request")
    }
}

#[async_trait]
impl ListingSource for MlsApiSource {
    async fn search(&self, criteria: &SearchCriteria, page: u32) -> Result<ListingPage> {
        let request = self.request(criteria, page)?;
        info!("Searching listings: {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .context("Failed to reach listings API")?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            anyhow::bail!("Listings search failed: {}", response.status());
        }

        let page: ListingPage = response
            .json()
            .await
            .context("Failed to decode listings response")?;

        debug!(
            "Received {} of {} listings (page {})",
            page.listings.len(),
            page.total,
            page.page
        );

        Ok(page)
    }

    fn source_name(&self) -> &'static str {
        "MLS API"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::from_query_string;

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let source = MlsApiSource::new("https://api.example.com/v2", None, 24).unwrap();
        assert_eq!(source.endpoint.as_str(), "https://api.example.com/v2/listings");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(MlsApiSource::new("not a url", None, 24).is_err());
    }

    #[test]
    fn request_carries_criteria_params_and_paging() {
        let source = MlsApiSource::new("https://api.example.com/", None, 12).unwrap();
        let criteria = from_query_string("city=Miami&state=FL&minPrice=0&propertyTypes=Condo,Townhouse");

        let request = source.request(&criteria, 2).unwrap();
        assert_eq!(
            query_pairs(&request),
            vec![
                ("city".to_string(), "Miami".to_string()),
                ("state".to_string(), "FL".to_string()),
                ("propertyTypes".to_string(), "Condo,Townhouse".to_string()),
                ("minPrice".to_string(), "0".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "12".to_string()),
            ]
        );
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn api_key_is_sent_as_bearer_token() {
        let source =
            MlsApiSource::new("https://api.example.com", Some("secret".to_string()), 24).unwrap();
        let request = source.request(&SearchCriteria::default(), 0).unwrap();

        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer secret"
        );
        assert_eq!(
            query_pairs(&request),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "24".to_string()),
            ]
        );
    }
}
