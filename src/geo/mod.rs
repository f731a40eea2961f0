pub mod geojson;

use crate::error::GeoError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use geojson::PolygonGeometry;

/// Mean earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A point on the map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the usual latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance in miles (haversine)
    pub fn distance_miles(&self, other: &LatLng) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
    }
}

/// Closed polygon ring held as its distinct vertices.
///
/// The closing vertex is implied; it only appears on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring(Vec<LatLng>);

impl Ring {
    pub fn vertices(&self) -> &[LatLng] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Even-odd ray cast in vertex order, longitude as x
    pub fn contains(&self, point: &LatLng) -> bool {
        let vertices = &self.0;
        let mut inside = false;
        let mut j = vertices.len() - 1;

        for i in 0..vertices.len() {
            let (a, b) = (vertices[i], vertices[j]);
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
                if point.lng < crossing {
                    inside = !inside;
                }
            }
            j = i;
        }

        inside
    }
}

/// Drawn-area filter: the ring plus its centroid for re-centering the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonGeometry", into = "PolygonGeometry")]
pub struct PolygonFilter {
    ring: Ring,
    centroid: LatLng,
}

impl PolygonFilter {
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn centroid(&self) -> LatLng {
        self.centroid
    }

    pub fn contains(&self, point: &LatLng) -> bool {
        self.ring.contains(point)
    }
}

/// Center point plus radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    pub center: LatLng,
    pub radius_miles: f64,
}

impl RadiusFilter {
    pub fn contains(&self, point: &LatLng) -> bool {
        self.center.distance_miles(point) <= self.radius_miles
    }
}

/// The single geographic predicate of a search
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFilter {
    Polygon(PolygonFilter),
    Radius(RadiusFilter),
}

impl GeoFilter {
    pub fn contains(&self, point: &LatLng) -> bool {
        match self {
            GeoFilter::Polygon(polygon) => polygon.contains(point),
            GeoFilter::Radius(radius) => radius.contains(point),
        }
    }
}

/// Build a polygon filter from drawn vertices.
///
/// Trailing vertices equal to the first are treated as the explicit closing
/// vertex and dropped. Callers are expected to pass at least three distinct
/// in-range vertices; anything less is rejected.
pub fn from_polygon(mut vertices: Vec<LatLng>) -> Result<PolygonFilter, GeoError> {
    if let Some(bad) = vertices.iter().find(|v| !v.is_valid()) {
        return Err(GeoError::OutOfRange {
            lat: bad.lat,
            lng: bad.lng,
        });
    }

    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    let distinct = count_distinct(&vertices);
    if distinct < 3 {
        return Err(GeoError::DegenerateRing { distinct });
    }

    let n = vertices.len() as f64;
    let centroid = LatLng {
        lat: vertices.iter().map(|v| v.lat).sum::<f64>() / n,
        lng: vertices.iter().map(|v| v.lng).sum::<f64>() / n,
    };

    Ok(PolygonFilter {
        ring: Ring(vertices),
        centroid,
    })
}

/// Build a radius filter; a non-positive or non-finite radius means no filter
pub fn from_radius(center: LatLng, radius_miles: f64) -> Option<RadiusFilter> {
    if !radius_miles.is_finite() || radius_miles <= 0.0 {
        debug!(radius_miles, "ignoring non-positive radius");
        return None;
    }

    Some(RadiusFilter {
        center,
        radius_miles,
    })
}

/// Pick the one geographic predicate of a search.
///
/// A drawn polygon wins over center+radius. Unusable input of either kind
/// is skipped, so the result may be `None`.
pub fn resolve(
    vertices: &[LatLng],
    center: Option<LatLng>,
    radius_miles: Option<f64>,
) -> Option<GeoFilter> {
    if !vertices.is_empty() {
        match from_polygon(vertices.to_vec()) {
            Ok(polygon) => return Some(GeoFilter::Polygon(polygon)),
            Err(err) => warn!(%err, "ignoring drawn area"),
        }
    }

    let center = center.filter(LatLng::is_valid)?;
    from_radius(center, radius_miles?).map(GeoFilter::Radius)
}

fn count_distinct(vertices: &[LatLng]) -> usize {
    let mut seen: Vec<LatLng> = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        if !seen.contains(vertex) {
            seen.push(*vertex);
        }
    }
    seen.len()
}
