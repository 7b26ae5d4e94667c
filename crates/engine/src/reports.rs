//! Report shapes built from the store's aggregates.

use serde::Serialize;

use crate::TripId;

/// Cost summary of a single trip.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripCost {
    pub trip_id: TripId,
    pub name: String,
    pub total_cost: u64,
    pub travelers: usize,
    pub cost_per_traveler: f64,
}

/// Per-trip costs plus the overall revenue.
///
/// An empty `trips` list means no trips exist, not that costs are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancialReport {
    pub trips: Vec<TripCost>,
    pub total_revenue: u64,
}

impl FinancialReport {
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// How many legs use a transport mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModeCount {
    pub transport_mode: String,
    pub legs: usize,
}

/// Leg count and cost for one leg type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegTypeSummary {
    pub leg_type: String,
    pub legs: usize,
    pub total_cost: u64,
}
