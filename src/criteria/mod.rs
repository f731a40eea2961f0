//! Canonical search criteria.
//!
//! Every search bar in the site feeds a [`SearchFields`] bag into
//! [`build`], which yields one [`SearchCriteria`]. The same value is
//! written to and read from URL query strings and saved-search records.

pub mod fields;
pub mod location;
pub mod matching;
pub mod normalize;
pub mod query;

use crate::error::ParseError;
use crate::geo::{GeoFilter, PolygonFilter, RadiusFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use fields::{HeroSearch, MapSearch, SearchBarInput, SearchFields};
pub use location::{parse_location_text, ParsedLocation};
pub use matching::sort_listings;
pub use normalize::{build, build_input};
pub use query::{from_query_params, from_query_string, to_query_params, to_query_string};

/// Status filter when none is given
pub const DEFAULT_STATUS: ListingStatus = ListingStatus::Active;

/// Sort order when none is given
pub const DEFAULT_SORT: SortOrder = SortOrder::NewestFirst;

/// Top stop of the price sliders; a max at or above it means "no max"
pub const PRICE_CEILING: f64 = 10_000_000.0;

/// Listing status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    Active,
    Pending,
    Closed,
    Expired,
    Withdrawn,
    All,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Pending => "Pending",
            ListingStatus::Closed => "Closed",
            ListingStatus::Expired => "Expired",
            ListingStatus::Withdrawn => "Withdrawn",
            ListingStatus::All => "All",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ListingStatus::Active),
            "pending" => Ok(ListingStatus::Pending),
            "closed" | "sold" => Ok(ListingStatus::Closed),
            "expired" => Ok(ListingStatus::Expired),
            "withdrawn" => Ok(ListingStatus::Withdrawn),
            "all" => Ok(ListingStatus::All),
            _ => Err(ParseError::UnknownStatus(s.trim().to_string())),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    PriceAsc,
    PriceDesc,
    SqftAsc,
    SqftDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "newest",
            SortOrder::OldestFirst => "oldest",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::SqftAsc => "sqft_asc",
            SortOrder::SqftDesc => "sqft_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::NewestFirst),
            "oldest" => Ok(SortOrder::OldestFirst),
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            "sqft_asc" => Ok(SortOrder::SqftAsc),
            "sqft_desc" => Ok(SortOrder::SqftDesc),
            _ => Err(ParseError::UnknownSort(s.trim().to_string())),
        }
    }
}

/// Geographic restriction of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// City / state / zip; at least one is set
    Place {
        city: Option<String>,
        state: Option<String>,
        zip: Option<String>,
    },
    Neighborhood {
        neighborhood: String,
        state: Option<String>,
    },
    County {
        county: String,
        state: Option<String>,
    },
    /// Drawn area, stored as a GeoJSON polygon
    Polygon(PolygonFilter),
    Radius(RadiusFilter),
}

impl From<GeoFilter> for Location {
    fn from(filter: GeoFilter) -> Self {
        match filter {
            GeoFilter::Polygon(polygon) => Location::Polygon(polygon),
            GeoFilter::Radius(radius) => Location::Radius(radius),
        }
    }
}

/// Optional lower and upper bound; `None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Both bounds present and min above max
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// A missing value only passes an unbounded range
    pub fn admits(&self, value: Option<T>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Bedroom filter; `exact` means "equals" instead of "at least"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BedsFilter {
    pub min: Option<u32>,
    pub exact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BathsFilter {
    pub min: Option<f64>,
}

/// Must-have amenities; `false` means no filter, not "must not have"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Amenities {
    pub pool: bool,
    pub waterfront: bool,
}

/// Normalized search filters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub location: Option<Location>,
    pub status: ListingStatus,
    pub property_types: BTreeSet<String>,
    pub price: Bounds<f64>,
    pub beds: BedsFilter,
    pub baths: BathsFilter,
    pub sqft: Bounds<f64>,
    pub lot_size_sqft: Bounds<f64>,
    pub lot_size_acres: Bounds<f64>,
    pub year_built: Bounds<u32>,
    pub garage_spaces: Option<u32>,
    pub parking_spaces: Option<u32>,
    pub amenities: Amenities,
    pub sort: SortOrder,
}

/// Non-fatal issue a UI may choose to flag
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaWarning {
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for CriteriaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaWarning::InvertedRange { field, min, max } => {
                write!(f, "{field}: minimum {min} is above maximum {max}")
            }
        }
    }
}

impl SearchCriteria {
    /// True when every field is at its default
    pub fn is_default(&self) -> bool {
        *self == SearchCriteria::default()
    }

    /// Inverted ranges, kept as given but reported here
    pub fn warnings(&self) -> Vec<CriteriaWarning> {
        let ranges: [(&'static str, Bounds<f64>); 5] = [
            ("price", self.price),
            ("sqft", self.sqft),
            ("lot_size_sqft", self.lot_size_sqft),
            ("lot_size_acres", self.lot_size_acres),
            (
                "year_built",
                Bounds::new(
                    self.year_built.min.map(f64::from),
                    self.year_built.max.map(f64::from),
                ),
            ),
        ];

        ranges
            .into_iter()
            .filter_map(|(field, bounds)| match (bounds.min, bounds.max) {
                (Some(min), Some(max)) if min > max => {
                    Some(CriteriaWarning::InvertedRange { field, min, max })
                }
                _ => None,
            })
            .collect()
    }
}
