use super::{from_polygon, LatLng, PolygonFilter};
use crate::error::GeoError;
use serde::{Deserialize, Serialize};

/// GeoJSON `Polygon` geometry.
///
/// Positions are `[lng, lat]` and every ring repeats its first position at
/// the end. Only the outer ring is used; holes are ignored on read. Positions
/// outside the longitude/latitude ranges are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl From<PolygonFilter> for PolygonGeometry {
    fn from(polygon: PolygonFilter) -> Self {
        let mut outer: Vec<[f64; 2]> = polygon
            .ring()
            .vertices()
            .iter()
            .map(|v| [v.lng, v.lat])
            .collect();
        if let Some(first) = outer.first().copied() {
            outer.push(first);
        }

        Self {
            kind: "Polygon".to_string(),
            coordinates: vec![outer],
        }
    }
}

impl TryFrom<PolygonGeometry> for PolygonFilter {
    type Error = GeoError;

    fn try_from(geometry: PolygonGeometry) -> Result<Self, Self::Error> {
        if geometry.kind != "Polygon" {
            return Err(GeoError::NotAPolygon {
                kind: geometry.kind,
            });
        }

        let outer = geometry
            .coordinates
            .into_iter()
            .next()
            .ok_or(GeoError::EmptyCoordinates)?;

        let vertices = outer
            .into_iter()
            .map(|[lng, lat]| LatLng { lat, lng })
            .collect();

        from_polygon(vertices)
    }
}

impl PolygonFilter {
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::to_value(PolygonGeometry::from(self.clone()))
            .unwrap_or(serde_json::Value::Null)
    }

    pub fn from_geojson(value: serde_json::Value) -> anyhow::Result<Self> {
        let geometry: PolygonGeometry = serde_json::from_value(value)?;
        Ok(PolygonFilter::try_from(geometry)?)
    }
}
