use super::fields::{SearchBarInput, SearchFields};
use super::location::{normalize_state, parse_location_text};
use super::{
    Amenities, BathsFilter, BedsFilter, Bounds, ListingStatus, Location, SearchCriteria,
    SortOrder, DEFAULT_SORT, DEFAULT_STATUS,
};
use crate::geo::{self, LatLng};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Normalize raw form state into canonical criteria.
///
/// Never fails: anything that does not parse becomes "no constraint".
/// Inverted ranges are kept as entered and logged.
pub fn build(fields: &SearchFields) -> SearchCriteria {
    let criteria = SearchCriteria {
        location: resolve_location(fields),
        status: fields
            .status
            .parse::<ListingStatus>()
            .unwrap_or(DEFAULT_STATUS),
        property_types: property_types(&fields.property_types),
        price: bounds(&fields.min_price, &fields.max_price, parse_number),
        beds: beds(fields),
        baths: BathsFilter {
            min: parse_number(&fields.baths),
        },
        sqft: bounds(&fields.min_sqft, &fields.max_sqft, parse_number),
        lot_size_sqft: bounds(&fields.min_lot_sqft, &fields.max_lot_sqft, parse_number),
        lot_size_acres: bounds(&fields.min_lot_acres, &fields.max_lot_acres, parse_number),
        year_built: bounds(&fields.min_year_built, &fields.max_year_built, parse_count),
        garage_spaces: parse_count(&fields.garage_spaces),
        parking_spaces: parse_count(&fields.parking_spaces),
        amenities: Amenities {
            pool: fields.pool,
            waterfront: fields.waterfront,
        },
        sort: fields.sort.parse::<SortOrder>().unwrap_or(DEFAULT_SORT),
    };

    for warning in criteria.warnings() {
        warn!("{}", warning);
    }

    criteria
}

/// Normalize the state of any search bar
pub fn build_input(input: SearchBarInput) -> SearchCriteria {
    build(&input.into_fields())
}

/// Lenient number parse: blank, garbage and non-finite values are absent.
///
/// Tolerates a leading `$` and thousands separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(input = text, "dropping unparsable number");
            None
        }
    }
}

/// Lenient whole-number parse for counts and years
pub fn parse_count(text: &str) -> Option<u32> {
    let value = parse_number(text)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        debug!(input = text, "dropping non-count value");
        return None;
    }
    Some(value as u32)
}

/// Checkbox-style flag from a query value
pub fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn bounds<T>(min: &str, max: &str, parse: fn(&str) -> Option<T>) -> Bounds<T> {
    Bounds {
        min: parse(min),
        max: parse(max),
    }
}

fn beds(fields: &SearchFields) -> BedsFilter {
    let min = parse_count(&fields.beds);
    BedsFilter {
        min,
        exact: fields.beds_exact && min.is_some(),
    }
}

/// Comma-split, trimmed, de-duplicated
fn property_types(raw: &[String]) -> BTreeSet<String> {
    raw.iter()
        .flat_map(|t| t.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drawn polygon, then center+radius, then structured fields, then free text
fn resolve_location(fields: &SearchFields) -> Option<Location> {
    let center = match (parse_number(&fields.center_lat), parse_number(&fields.center_lng)) {
        (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
        _ => None,
    };

    if let Some(filter) = geo::resolve(
        &fields.polygon_vertices,
        center,
        parse_number(&fields.radius_miles),
    ) {
        return Some(filter.into());
    }

    structured_location(fields).or_else(|| text_location(&fields.location_text))
}

fn structured_location(fields: &SearchFields) -> Option<Location> {
    let state = normalize_state(&fields.state);

    if let Some(neighborhood) = non_blank(&fields.neighborhood) {
        return Some(Location::Neighborhood {
            neighborhood,
            state,
        });
    }

    if let Some(county) = non_blank(&fields.county) {
        return Some(Location::County { county, state });
    }

    let city = non_blank(&fields.city);
    let zip = non_blank(&fields.zip);
    if city.is_none() && state.is_none() && zip.is_none() {
        return None;
    }

    Some(Location::Place { city, state, zip })
}

fn text_location(text: &str) -> Option<Location> {
    let parsed = parse_location_text(text)?;

    Some(match parsed.neighborhood {
        Some(neighborhood) => Location::Neighborhood {
            neighborhood,
            state: parsed.state,
        },
        None => Location::Place {
            city: parsed.city,
            state: parsed.state,
            zip: parsed.zip,
        },
    })
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
