use super::PRICE_CEILING;
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Raw control state of a search form.
///
/// Numeric inputs stay as the strings the controls produced; an empty
/// string means the control was left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFields {
    /// Free-text "City, ST" / zip / neighborhood box
    pub location_text: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub neighborhood: String,
    pub county: String,
    pub polygon_vertices: Vec<LatLng>,
    pub center_lat: String,
    pub center_lng: String,
    pub radius_miles: String,
    pub status: String,
    pub property_types: Vec<String>,
    pub min_price: String,
    pub max_price: String,
    pub beds: String,
    pub beds_exact: bool,
    pub baths: String,
    pub min_sqft: String,
    pub max_sqft: String,
    pub min_lot_sqft: String,
    pub max_lot_sqft: String,
    pub min_lot_acres: String,
    pub max_lot_acres: String,
    pub min_year_built: String,
    pub max_year_built: String,
    pub garage_spaces: String,
    pub parking_spaces: String,
    pub pool: bool,
    pub waterfront: bool,
    pub sort: String,
}

impl SearchFields {
    /// Multiselect click: remove the type if selected, add it otherwise
    pub fn toggle_property_type(&mut self, property_type: &str) {
        let property_type = property_type.trim();
        if property_type.is_empty() {
            return;
        }

        if let Some(pos) = self
            .property_types
            .iter()
            .position(|t| t.trim() == property_type)
        {
            self.property_types.remove(pos);
        } else {
            self.property_types.push(property_type.to_string());
        }
    }

    pub fn set_center(&mut self, center: LatLng, radius_miles: f64) {
        self.center_lat = center.lat.to_string();
        self.center_lng = center.lng.to_string();
        self.radius_miles = radius_miles.to_string();
    }
}

/// Landing-page search bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSearch {
    pub location: String,
    pub property_type: String,
    pub min_price: String,
    /// Slider value; the top stop is [`PRICE_CEILING`]
    pub max_price: Option<f64>,
    pub beds: String,
}

impl HeroSearch {
    pub fn into_fields(self) -> SearchFields {
        let mut fields = SearchFields {
            location_text: self.location,
            min_price: self.min_price,
            beds: self.beds,
            ..Default::default()
        };

        if let Some(max) = self.max_price.filter(|max| *max < PRICE_CEILING) {
            fields.max_price = max.to_string();
        }
        fields.toggle_property_type(&self.property_type);

        fields
    }
}

/// Map page: drawn area or center+radius on top of the filter panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSearch {
    pub vertices: Vec<LatLng>,
    pub center: Option<LatLng>,
    pub radius_miles: Option<f64>,
    pub fields: SearchFields,
}

impl MapSearch {
    pub fn into_fields(self) -> SearchFields {
        let mut fields = self.fields;
        if !self.vertices.is_empty() {
            fields.polygon_vertices = self.vertices;
        }
        if let (Some(center), Some(radius)) = (self.center, self.radius_miles) {
            fields.set_center(center, radius);
        }
        fields
    }
}

/// Any of the site's search bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum SearchBarInput {
    Hero(HeroSearch),
    Advanced(SearchFields),
    Map(MapSearch),
}

impl SearchBarInput {
    pub fn into_fields(self) -> SearchFields {
        match self {
            SearchBarInput::Hero(hero) => hero.into_fields(),
            SearchBarInput::Advanced(fields) => fields,
            SearchBarInput::Map(map) => map.into_fields(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut fields = SearchFields::default();
        fields.toggle_property_type("Condo");
        fields.toggle_property_type("Townhouse");
        assert_eq!(fields.property_types, vec!["Condo", "Townhouse"]);

        fields.toggle_property_type(" Condo ");
        assert_eq!(fields.property_types, vec!["Townhouse"]);
    }

    #[test]
    fn toggle_ignores_blank() {
        let mut fields = SearchFields::default();
        fields.toggle_property_type("  ");
        assert!(fields.property_types.is_empty());
    }

    #[test]
    fn hero_slider_at_ceiling_means_no_max() {
        let hero = HeroSearch {
            location: "Miami, FL".to_string(),
            max_price: Some(PRICE_CEILING),
            ..Default::default()
        };
        let fields = hero.into_fields();
        assert_eq!(fields.location_text, "Miami, FL");
        assert!(fields.max_price.is_empty());
        assert!(fields.property_types.is_empty());
    }

    #[test]
    fn hero_slider_below_ceiling_sets_max() {
        let hero = HeroSearch {
            property_type: "Condo".to_string(),
            max_price: Some(750_000.0),
            ..Default::default()
        };
        let fields = hero.into_fields();
        assert_eq!(fields.max_price, "750000");
        assert_eq!(fields.property_types, vec!["Condo"]);
    }

    #[test]
    fn map_search_carries_center_and_radius() {
        let map = MapSearch {
            center: Some(LatLng::new(25.77, -80.19)),
            radius_miles: Some(2.5),
            ..Default::default()
        };
        let fields = SearchBarInput::Map(map).into_fields();
        assert_eq!(fields.center_lat, "25.77");
        assert_eq!(fields.center_lng, "-80.19");
        assert_eq!(fields.radius_miles, "2.5");
        assert!(fields.polygon_vertices.is_empty());
    }
}
