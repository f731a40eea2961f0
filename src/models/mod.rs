use crate::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location information for a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: Option<String>,
    pub neighborhood: Option<String>,
    pub county: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Address {
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
            _ => None,
        }
    }

    /// Single-line form used on cards and in comparisons
    pub fn one_line(&self) -> String {
        let mut line = format!("{}, {}, {}", self.street, self.city, self.state);
        if let Some(zip) = &self.zip {
            line.push(' ');
            line.push_str(zip);
        }
        line
    }
}

/// Core listing data model, as returned by the listings API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub mls_id: String,
    pub address: Address,
    pub status: String,
    pub property_type: String,
    pub price: Option<f64>,
    pub beds: Option<u32>,
    pub baths: Option<f64>,
    pub sqft: Option<f64>,
    pub lot_size_sqft: Option<f64>,
    pub year_built: Option<u32>,
    pub garage_spaces: Option<u32>,
    pub parking_spaces: Option<u32>,
    #[serde(default)]
    pub pool: bool,
    #[serde(default)]
    pub waterfront: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub listed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub raw_data: serde_json::Value,
}

/// The slice of a listing the comparison view works with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub mls_id: String,
    pub price: Option<f64>,
    pub sqft: Option<f64>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub year_built: Option<f64>,
    pub address: String,
    pub images: Vec<String>,
    pub property_type: String,
    pub status: String,
}

impl ListingSummary {
    /// Price per square foot, only when both are known and sqft is positive
    pub fn price_per_sqft(&self) -> Option<f64> {
        match (self.price, self.sqft) {
            (Some(price), Some(sqft)) if sqft > 0.0 => Some(price / sqft),
            _ => None,
        }
    }
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        Self {
            mls_id: listing.mls_id.clone(),
            price: listing.price,
            sqft: listing.sqft,
            beds: listing.beds.map(f64::from),
            baths: listing.baths,
            year_built: listing.year_built.map(f64::from),
            address: listing.address.one_line(),
            images: listing.images.clone(),
            property_type: listing.property_type.clone(),
            status: listing.status.clone(),
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl ListingPage {
    pub fn has_more(&self) -> bool {
        (self.page as usize) * (self.page_size as usize) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_per_sqft_needs_positive_sqft() {
        let mut summary = ListingSummary {
            price: Some(300_000.0),
            sqft: Some(1_500.0),
            ..Default::default()
        };
        assert_eq!(summary.price_per_sqft(), Some(200.0));

        summary.sqft = Some(0.0);
        assert_eq!(summary.price_per_sqft(), None);

        summary.sqft = None;
        assert_eq!(summary.price_per_sqft(), None);
    }

    #[test]
    fn address_one_line_includes_zip_when_present() {
        let mut address = Address {
            street: "100 Biscayne Blvd".to_string(),
            city: "Miami".to_string(),
            state: "FL".to_string(),
            ..Default::default()
        };
        assert_eq!(address.one_line(), "100 Biscayne Blvd, Miami, FL");

        address.zip = Some("33132".to_string());
        assert_eq!(address.one_line(), "100 Biscayne Blvd, Miami, FL 33132");
    }

    #[test]
    fn page_reports_more_results() {
        let page = ListingPage {
            listings: vec![],
            total: 30,
            page: 1,
            page_size: 24,
        };
        assert!(page.has_more());
        assert!(!ListingPage { page: 2, ..page }.has_more());
    }
}
