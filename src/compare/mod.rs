//! Best-value highlighting for the side-by-side comparison view.
//!
//! For each comparable field, every listing holding the extremal value is
//! flagged. Missing or zero values never win.

use crate::models::ListingSummary;
use serde::Serialize;
use std::collections::BTreeMap;

/// Most listings the comparison view holds at once
pub const MAX_COMPARE: usize = 4;

/// Which end of a field is the good one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// One comparable field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub accessor: fn(&ListingSummary) -> Option<f64>,
    pub direction: Direction,
}

impl FieldSpec {
    pub fn new(
        name: &'static str,
        accessor: fn(&ListingSummary) -> Option<f64>,
        direction: Direction,
    ) -> Self {
        Self {
            name,
            accessor,
            direction,
        }
    }

    /// Present and positive, otherwise not eligible
    fn value(&self, listing: &ListingSummary) -> Option<f64> {
        (self.accessor)(listing).filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Fields shown in the comparison table
pub fn default_field_specs() -> Vec<FieldSpec> {
    use Direction::*;

    vec![
        FieldSpec::new("price", |l| l.price, LowerIsBetter),
        FieldSpec::new("price_per_sqft", ListingSummary::price_per_sqft, LowerIsBetter),
        FieldSpec::new("beds", |l| l.beds, HigherIsBetter),
        FieldSpec::new("baths", |l| l.baths, HigherIsBetter),
        FieldSpec::new("sqft", |l| l.sqft, HigherIsBetter),
        FieldSpec::new("year_built", |l| l.year_built, HigherIsBetter),
    ]
}

/// Field name to per-listing flags, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BestValues(BTreeMap<&'static str, Vec<bool>>);

impl BestValues {
    pub fn get(&self, field: &str) -> Option<&[bool]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// True when `index` is flagged best for `field`
    pub fn is_best(&self, field: &str, index: usize) -> bool {
        self.get(field)
            .and_then(|mask| mask.get(index).copied())
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[bool])> {
        self.0.iter().map(|(name, mask)| (*name, mask.as_slice()))
    }
}

/// Compute the best-value mask of every field.
///
/// Ties flag every holder of the extremal value. With fewer than two
/// listings nothing is flagged.
pub fn compute_best_values(listings: &[ListingSummary], specs: &[FieldSpec]) -> BestValues {
    let masks = specs
        .iter()
        .map(|spec| (spec.name, best_mask(listings, spec)))
        .collect();

    BestValues(masks)
}

fn best_mask(listings: &[ListingSummary], spec: &FieldSpec) -> Vec<bool> {
    if listings.len() < 2 {
        return vec![false; listings.len()];
    }

    let values: Vec<Option<f64>> = listings.iter().map(|l| spec.value(l)).collect();

    let best = values.iter().flatten().copied().reduce(|a, b| match spec.direction {
        Direction::LowerIsBetter => a.min(b),
        Direction::HigherIsBetter => a.max(b),
    });

    match best {
        Some(best) => values.iter().map(|v| *v == Some(best)).collect(),
        None => vec![false; listings.len()],
    }
}

/// The listings picked for comparison, unique by MLS id
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    listings: Vec<ListingSummary>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listings(&self) -> &[ListingSummary] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.listings.len() >= MAX_COMPARE
    }

    pub fn contains(&self, mls_id: &str) -> bool {
        self.listings.iter().any(|l| l.mls_id == mls_id)
    }

    /// Returns `false` when the set is full or already holds the listing
    pub fn add(&mut self, listing: ListingSummary) -> bool {
        if self.is_full() || self.contains(&listing.mls_id) {
            return false;
        }
        self.listings.push(listing);
        true
    }

    pub fn remove(&mut self, mls_id: &str) -> Option<ListingSummary> {
        let pos = self.listings.iter().position(|l| l.mls_id == mls_id)?;
        Some(self.listings.remove(pos))
    }

    /// Remove if present, add otherwise; returns whether it is now selected
    pub fn toggle(&mut self, listing: ListingSummary) -> bool {
        if self.remove(&listing.mls_id).is_some() {
            return false;
        }
        self.add(listing)
    }

    pub fn best_values(&self) -> BestValues {
        compute_best_values(&self.listings, &default_field_specs())
    }
}
