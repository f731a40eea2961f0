//! Search criteria, geographic filters and listing comparison for the
//! property search site.

pub mod compare;
pub mod config;
pub mod criteria;
pub mod error;
pub mod geo;
pub mod models;
pub mod sources;
pub mod store;

pub use compare::{compute_best_values, default_field_specs, BestValues, ComparisonSet};
pub use criteria::{build, from_query_params, to_query_params, SearchCriteria};
pub use error::{GeoError, ParseError};
pub use models::{Listing, ListingSummary};
