//! Flat key/value form of [`SearchCriteria`].
//!
//! This is both the URL query string and the request parameters of the
//! listings API. Keys at their default value are left out.

use super::fields::SearchFields;
use super::normalize::{build, parse_flag, parse_number};
use super::{Bounds, Location, SearchCriteria, DEFAULT_SORT, DEFAULT_STATUS};
use crate::geo::LatLng;
use tracing::debug;
use url::form_urlencoded;

/// Ordered query pairs for `criteria`, defaults omitted
pub fn to_query_params(criteria: &SearchCriteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    match &criteria.location {
        Some(Location::Place { city, state, zip }) => {
            push_opt(&mut params, "city", city.as_deref());
            push_opt(&mut params, "state", state.as_deref());
            push_opt(&mut params, "zip", zip.as_deref());
        }
        Some(Location::Neighborhood {
            neighborhood,
            state,
        }) => {
            params.push(("neighborhood", neighborhood.clone()));
            push_opt(&mut params, "state", state.as_deref());
        }
        Some(Location::County { county, state }) => {
            params.push(("county", county.clone()));
            push_opt(&mut params, "state", state.as_deref());
        }
        Some(Location::Polygon(polygon)) => {
            params.push(("polygon", encode_vertices(polygon.ring().vertices())));
        }
        Some(Location::Radius(radius)) => {
            params.push(("centerLat", radius.center.lat.to_string()));
            params.push(("centerLng", radius.center.lng.to_string()));
            params.push(("radiusMiles", radius.radius_miles.to_string()));
        }
        None => {}
    }

    if criteria.status != DEFAULT_STATUS {
        params.push(("status", criteria.status.to_string()));
    }
    if !criteria.property_types.is_empty() {
        let joined: Vec<&str> = criteria.property_types.iter().map(String::as_str).collect();
        params.push(("propertyTypes", joined.join(",")));
    }

    push_bounds(&mut params, ("minPrice", "maxPrice"), &criteria.price);

    if let Some(beds) = criteria.beds.min {
        params.push(("beds", beds.to_string()));
        if criteria.beds.exact {
            params.push(("bedsExact", "true".to_string()));
        }
    }
    if let Some(baths) = criteria.baths.min {
        params.push(("baths", baths.to_string()));
    }

    push_bounds(&mut params, ("minSqft", "maxSqft"), &criteria.sqft);
    push_bounds(&mut params, ("minLotSqft", "maxLotSqft"), &criteria.lot_size_sqft);
    push_bounds(&mut params, ("minLotAcres", "maxLotAcres"), &criteria.lot_size_acres);
    push_bounds(&mut params, ("minYearBuilt", "maxYearBuilt"), &criteria.year_built);

    if let Some(garage) = criteria.garage_spaces {
        params.push(("garageSpaces", garage.to_string()));
    }
    if let Some(parking) = criteria.parking_spaces {
        params.push(("parkingSpaces", parking.to_string()));
    }
    if criteria.amenities.pool {
        params.push(("pool", "true".to_string()));
    }
    if criteria.amenities.waterfront {
        params.push(("waterfront", "true".to_string()));
    }
    if criteria.sort != DEFAULT_SORT {
        params.push(("sort", criteria.sort.to_string()));
    }

    params
}

/// Rebuild criteria from query pairs; unknown keys are ignored
pub fn from_query_params<I, K, V>(params: I) -> SearchCriteria
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut fields = SearchFields::default();

    for (key, value) in params {
        let value = value.as_ref().to_string();
        match key.as_ref() {
            "location" => fields.location_text = value,
            "city" => fields.city = value,
            "state" => fields.state = value,
            "zip" => fields.zip = value,
            "neighborhood" => fields.neighborhood = value,
            "county" => fields.county = value,
            "polygon" => fields.polygon_vertices = decode_vertices(&value),
            "centerLat" => fields.center_lat = value,
            "centerLng" => fields.center_lng = value,
            "radiusMiles" => fields.radius_miles = value,
            "status" => fields.status = value,
            "propertyTypes" => fields.property_types = vec![value],
            "minPrice" => fields.min_price = value,
            "maxPrice" => fields.max_price = value,
            "beds" => fields.beds = value,
            "bedsExact" => fields.beds_exact = parse_flag(&value),
            "baths" => fields.baths = value,
            "minSqft" => fields.min_sqft = value,
            "maxSqft" => fields.max_sqft = value,
            "minLotSqft" => fields.min_lot_sqft = value,
            "maxLotSqft" => fields.max_lot_sqft = value,
            "minLotAcres" => fields.min_lot_acres = value,
            "maxLotAcres" => fields.max_lot_acres = value,
            "minYearBuilt" => fields.min_year_built = value,
            "maxYearBuilt" => fields.max_year_built = value,
            "garageSpaces" => fields.garage_spaces = value,
            "parkingSpaces" => fields.parking_spaces = value,
            "pool" => fields.pool = parse_flag(&value),
            "waterfront" => fields.waterfront = parse_flag(&value),
            "sort" => fields.sort = value,
            other => debug!(key = other, "ignoring unknown query key"),
        }
    }

    build(&fields)
}

/// URL-encoded form of [`to_query_params`], without the leading `?`
pub fn to_query_string(criteria: &SearchCriteria) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query_params(criteria))
        .finish()
}

/// Parse a query string, with or without the leading `?`
pub fn from_query_string(query: &str) -> SearchCriteria {
    let query = query.trim().trim_start_matches('?');
    from_query_params(form_urlencoded::parse(query.as_bytes()))
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn push_bounds<T: ToString>(
    params: &mut Vec<(&'static str, String)>,
    (min_key, max_key): (&'static str, &'static str),
    bounds: &Bounds<T>,
) {
    if let Some(min) = &bounds.min {
        params.push((min_key, min.to_string()));
    }
    if let Some(max) = &bounds.max {
        params.push((max_key, max.to_string()));
    }
}

/// `lat,lng|lat,lng|...`
fn encode_vertices(vertices: &[LatLng]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v.lat, v.lng))
        .collect::<Vec<_>>()
        .join("|")
}

/// Any malformed pair discards the whole ring
fn decode_vertices(text: &str) -> Vec<LatLng> {
    let vertices: Option<Vec<LatLng>> = text
        .split('|')
        .map(|pair| {
            let (lat, lng) = pair.split_once(',')?;
            Some(LatLng {
                lat: parse_number(lat)?,
                lng: parse_number(lng)?,
            })
        })
        .collect();

    vertices.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{
        Amenities, BathsFilter, BedsFilter, ListingStatus, SortOrder,
    };
    use crate::geo;
    use proptest::prelude::*;

    fn miami_box() -> Vec<LatLng> {
        vec![
            LatLng::new(25.76, -80.19),
            LatLng::new(25.80, -80.19),
            LatLng::new(25.80, -80.10),
            LatLng::new(25.76, -80.10),
        ]
    }

    fn full_criteria() -> SearchCriteria {
        SearchCriteria {
            location: Some(Location::Place {
                city: Some("Miami".to_string()),
                state: Some("FL".to_string()),
                zip: Some("33131".to_string()),
            }),
            status: ListingStatus::Pending,
            property_types: ["Condo", "Single Family"]
                .into_iter()
                .map(String::from)
                .collect(),
            price: Bounds::new(Some(0.0), Some(1_250_000.5)),
            beds: BedsFilter {
                min: Some(3),
                exact: true,
            },
            baths: BathsFilter { min: Some(2.5) },
            sqft: Bounds::new(Some(1_200.0), None),
            lot_size_sqft: Bounds::new(None, Some(10_000.0)),
            lot_size_acres: Bounds::new(Some(0.25), Some(2.0)),
            year_built: Bounds::new(Some(1990), Some(2024)),
            garage_spaces: Some(2),
            parking_spaces: Some(0),
            amenities: Amenities {
                pool: true,
                waterfront: true,
            },
            sort: SortOrder::PriceDesc,
        }
    }

    #[test]
    fn default_criteria_emit_no_keys() {
        assert!(to_query_params(&SearchCriteria::default()).is_empty());
        assert_eq!(to_query_string(&SearchCriteria::default()), "");
    }

    #[test]
    fn explicit_zero_min_price_is_emitted() {
        let criteria = SearchCriteria {
            price: Bounds::new(Some(0.0), None),
            ..Default::default()
        };
        assert_eq!(
            to_query_params(&criteria),
            vec![("minPrice", "0".to_string())]
        );
        assert_eq!(from_query_params(to_query_params(&criteria)).price.min, Some(0.0));
    }

    #[test]
    fn property_types_are_comma_joined() {
        let criteria = full_criteria();
        let params = to_query_params(&criteria);
        assert!(params.contains(&("propertyTypes", "Condo,Single Family".to_string())));
    }

    #[test]
    fn full_criteria_round_trip() {
        let criteria = full_criteria();
        assert_eq!(from_query_params(to_query_params(&criteria)), criteria);
        assert_eq!(from_query_string(&to_query_string(&criteria)), criteria);
    }

    #[test]
    fn polygon_criteria_round_trip() {
        let criteria = SearchCriteria {
            location: Some(Location::Polygon(geo::from_polygon(miami_box()).unwrap())),
            ..Default::default()
        };
        assert_eq!(from_query_string(&to_query_string(&criteria)), criteria);
    }

    #[test]
    fn radius_criteria_round_trip() {
        let criteria = SearchCriteria {
            location: Some(Location::Radius(
                geo::from_radius(LatLng::new(25.7617, -80.1918), 1.75).unwrap(),
            )),
            status: ListingStatus::All,
            ..Default::default()
        };
        let params = to_query_params(&criteria);
        assert_eq!(params[2], ("radiusMiles", "1.75".to_string()));
        assert_eq!(from_query_params(params), criteria);
    }

    #[test]
    fn neighborhood_and_county_round_trip() {
        for location in [
            Location::Neighborhood {
                neighborhood: "Coconut Grove".to_string(),
                state: None,
            },
            Location::County {
                county: "Miami-Dade".to_string(),
                state: Some("FL".to_string()),
            },
        ] {
            let criteria = SearchCriteria {
                location: Some(location),
                ..Default::default()
            };
            assert_eq!(from_query_string(&to_query_string(&criteria)), criteria);
        }
    }

    #[test]
    fn built_from_free_text_round_trips() {
        let fields = SearchFields {
            location_text: "Brickell, Miami, fl".to_string(),
            min_price: "abc".to_string(),
            max_price: "500000".to_string(),
            property_types: vec!["Condo".to_string(), "Condo".to_string()],
            ..Default::default()
        };
        let criteria = build(&fields);
        assert_eq!(from_query_params(to_query_params(&criteria)), criteria);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let criteria = from_query_string("?utm_source=mail&minPrice=100000&page=3");
        assert_eq!(criteria.price.min, Some(100_000.0));
        assert_eq!(
            SearchCriteria {
                price: Bounds::default(),
                ..criteria
            },
            SearchCriteria::default()
        );
    }

    #[test]
    fn garbage_values_never_fail() {
        let criteria = from_query_string("minPrice=lots&beds=many&polygon=1,2|x&status=??");
        assert!(criteria.is_default());
    }

    #[test]
    fn free_text_location_key_is_accepted() {
        let criteria = from_query_string("location=Miami%2C+FL");
        assert_eq!(
            criteria.location,
            Some(Location::Place {
                city: Some("Miami".to_string()),
                state: Some("FL".to_string()),
                zip: None
            })
        );
    }

    const NUMBERS: &[&str] = &[
        "", "0", "2", "2.5", "-3", "1999", "2024", "250000", "$1,200,000", "1e3", "abc", "NaN",
    ];
    const LOCATION_TEXT: &[&str] = &[
        "",
        "Miami",
        "Miami, fl",
        "Miami, FL 33101",
        "Miami, FL, 33101",
        "Brickell, Miami, FL",
        "Brickell, Miami, FL, 33131",
        "33101-1234",
        " , ",
    ];
    const CITIES: &[&str] = &["", "Miami", "Coral Gables", " Miami Beach "];
    const STATES: &[&str] = &["", "fl", "FL", "Florida", " ny "];
    const ZIPS: &[&str] = &["", "33131", "33101-1234"];
    const AREAS: &[&str] = &["", "Wynwood", "Miami-Dade", " Coconut Grove "];
    const COORDS: &[&str] = &["", "25.77", "-80.19", "99", "abc"];
    const STATUSES: &[&str] = &["", "active", "Pending", "sold", "ALL", "bogus"];
    const TYPES: &[&str] = &["", "Condo", " Condo ", "Single Family,Townhouse"];
    const SORTS: &[&str] = &["", "newest", "price_desc", "SQFT_ASC", "random"];

    fn pick(values: &'static [&'static str]) -> impl Strategy<Value = String> {
        prop::sample::select(values).prop_map(|s| s.to_string())
    }

    fn drawn_areas() -> impl Strategy<Value = Vec<LatLng>> {
        let mut closed = miami_box();
        closed.push(closed[0]);
        prop::sample::select(vec![
            Vec::new(),
            miami_box(),
            closed,
            vec![LatLng::new(25.0, -80.0), LatLng::new(25.1, -80.0)],
        ])
    }

    fn search_fields() -> impl Strategy<Value = SearchFields> {
        let location = (
            pick(LOCATION_TEXT),
            pick(CITIES),
            pick(STATES),
            pick(ZIPS),
            pick(AREAS),
            pick(AREAS),
            drawn_areas(),
            pick(COORDS),
            pick(COORDS),
            pick(NUMBERS),
        );
        let filters = (
            pick(STATUSES),
            prop::collection::vec(pick(TYPES), 0..3),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            any::<bool>(),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
        );
        let extras = (
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            pick(NUMBERS),
            any::<bool>(),
            any::<bool>(),
            pick(SORTS),
        );

        (location, filters, extras).prop_map(
            |(
                (location_text, city, state, zip, neighborhood, county, polygon_vertices, center_lat, center_lng, radius_miles),
                (status, property_types, min_price, max_price, beds, beds_exact, baths, min_sqft, max_sqft, min_lot_sqft, max_lot_sqft),
                (min_lot_acres, max_lot_acres, min_year_built, max_year_built, garage_spaces, parking_spaces, pool, waterfront, sort),
            )| SearchFields {
                location_text,
                city,
                state,
                zip,
                neighborhood,
                county,
                polygon_vertices,
                center_lat,
                center_lng,
                radius_miles,
                status,
                property_types,
                min_price,
                max_price,
                beds,
                beds_exact,
                baths,
                min_sqft,
                max_sqft,
                min_lot_sqft,
                max_lot_sqft,
                min_lot_acres,
                max_lot_acres,
                min_year_built,
                max_year_built,
                garage_spaces,
                parking_spaces,
                pool,
                waterfront,
                sort,
            },
        )
    }

    proptest! {
        #[test]
        fn any_built_criteria_round_trip(fields in search_fields()) {
            let criteria = build(&fields);
            prop_assert_eq!(from_query_string(&to_query_string(&criteria)), criteria.clone());
            prop_assert_eq!(from_query_params(to_query_params(&criteria)), criteria);
        }
    }
}
