use super::{ListingStatus, Location, SearchCriteria, SortOrder};
use crate::models::{Address, Listing};
use std::cmp::Ordering;

const SQFT_PER_ACRE: f64 = 43_560.0;

impl SearchCriteria {
    /// Evaluate the criteria against a single listing.
    ///
    /// A listing missing a value fails any bound on that value.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_location(&listing.address)
            && self.matches_status(&listing.status)
            && self.matches_type(&listing.property_type)
            && self.price.admits(listing.price)
            && self.matches_beds(listing.beds)
            && self.baths.min.map_or(true, |min| listing.baths.map_or(false, |b| b >= min))
            && self.sqft.admits(listing.sqft)
            && self.lot_size_sqft.admits(listing.lot_size_sqft)
            && self
                .lot_size_acres
                .admits(listing.lot_size_sqft.map(|sqft| sqft / SQFT_PER_ACRE))
            && self.year_built.admits(listing.year_built)
            && at_least(self.garage_spaces, listing.garage_spaces)
            && at_least(self.parking_spaces, listing.parking_spaces)
            && (!self.amenities.pool || listing.pool)
            && (!self.amenities.waterfront || listing.waterfront)
    }

    fn matches_location(&self, address: &Address) -> bool {
        let Some(location) = &self.location else {
            return true;
        };

        match location {
            Location::Place { city, state, zip } => {
                same(city.as_deref(), Some(&address.city))
                    && same(state.as_deref(), Some(&address.state))
                    && same(zip.as_deref(), address.zip.as_ref())
            }
            Location::Neighborhood {
                neighborhood,
                state,
            } => {
                same(Some(neighborhood.as_str()), address.neighborhood.as_ref())
                    && same(state.as_deref(), Some(&address.state))
            }
            Location::County { county, state } => {
                same(Some(county.as_str()), address.county.as_ref())
                    && same(state.as_deref(), Some(&address.state))
            }
            Location::Polygon(polygon) => address
                .coordinates()
                .map_or(false, |point| polygon.contains(&point)),
            Location::Radius(radius) => address
                .coordinates()
                .map_or(false, |point| radius.contains(&point)),
        }
    }

    fn matches_status(&self, status: &str) -> bool {
        self.status == ListingStatus::All
            || status.parse::<ListingStatus>().map_or(false, |s| s == self.status)
    }

    fn matches_type(&self, property_type: &str) -> bool {
        self.property_types.is_empty()
            || self
                .property_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(property_type.trim()))
    }

    fn matches_beds(&self, beds: Option<u32>) -> bool {
        match (self.beds.min, beds) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(min), Some(beds)) if self.beds.exact => beds == min,
            (Some(min), Some(beds)) => beds >= min,
        }
    }
}

/// Order listings in place; listings missing the sort key go last
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    listings.sort_by(|a, b| match order {
        SortOrder::NewestFirst => missing_last(a.listed_at, b.listed_at, true),
        SortOrder::OldestFirst => missing_last(a.listed_at, b.listed_at, false),
        SortOrder::PriceAsc => missing_last(a.price, b.price, false),
        SortOrder::PriceDesc => missing_last(a.price, b.price, true),
        SortOrder::SqftAsc => missing_last(a.sqft, b.sqft, false),
        SortOrder::SqftDesc => missing_last(a.sqft, b.sqft, true),
    });
}

fn missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn at_least(min: Option<u32>, value: Option<u32>) -> bool {
    min.map_or(true, |min| value.map_or(false, |v| v >= min))
}

/// Case-insensitive equality; an absent wanted value matches anything
fn same(wanted: Option<&str>, actual: Option<&String>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual.trim()),
    }
}
