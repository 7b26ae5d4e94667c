//! Trip legs.
//!
//! A [`TripLeg`] is one segment of a trip: a transfer between two places, a
//! stay, or a point of interest. Its `trip_id` is checked against the trip
//! collection when the leg is created, and the owning trip lists the leg's id
//! in [`Trip::legs`](crate::Trip::legs).
//!
//! Costs are whole, non-negative amounts.

use serde::Serialize;

use crate::{
    FieldRejection, TripId, TripLegId,
    collection::Record,
    util::{Patcher, parse_cost},
};

/// A stay somewhere.
pub const LEG_ACCOMMODATION: &str = "accommodation";
/// A point of interest.
pub const LEG_POI: &str = "poi";
/// Moving between locations.
pub const LEG_TRANSFER: &str = "transfer";

/// The leg types the console suggests. The store accepts any text.
pub const KNOWN_LEG_TYPES: [&str; 3] = [LEG_ACCOMMODATION, LEG_POI, LEG_TRANSFER];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TripLeg {
    pub id: TripLegId,
    pub trip_id: TripId,
    pub start_location: String,
    pub destination: String,
    pub transport_provider: String,
    pub transport_mode: String,
    pub leg_type: String,
    pub cost: u64,
}

#[derive(Clone, Debug)]
pub struct NewTripLeg {
    pub trip_id: TripId,
    pub start_location: String,
    pub destination: String,
    pub transport_provider: String,
    pub transport_mode: String,
    pub leg_type: String,
    pub cost: u64,
}

/// Partial update of a [`TripLeg`]. The owning trip cannot be changed.
#[derive(Clone, Debug, Default)]
pub struct TripLegPatch {
    pub start_location: Option<String>,
    pub destination: Option<String>,
    pub transport_provider: Option<String>,
    pub transport_mode: Option<String>,
    pub leg_type: Option<String>,
    pub cost: Option<String>,
}

impl TripLeg {
    pub(crate) fn new(id: TripLegId, fields: NewTripLeg) -> Self {
        Self {
            id,
            trip_id: fields.trip_id,
            start_location: fields.start_location,
            destination: fields.destination,
            transport_provider: fields.transport_provider,
            transport_mode: fields.transport_mode,
            leg_type: fields.leg_type,
            cost: fields.cost,
        }
    }

    pub(crate) fn apply(&mut self, patch: TripLegPatch) -> Vec<FieldRejection> {
        let mut patcher = Patcher::default();
        patcher.text(&mut self.start_location, patch.start_location);
        patcher.text(&mut self.destination, patch.destination);
        patcher.text(&mut self.transport_provider, patch.transport_provider);
        patcher.text(&mut self.transport_mode, patch.transport_mode);
        patcher.text(&mut self.leg_type, patch.leg_type);
        patcher.parsed(&mut self.cost, patch.cost, |raw| parse_cost("cost", raw));
        patcher.finish()
    }

    /// `true` when the leg type is one of [`KNOWN_LEG_TYPES`].
    pub fn has_known_type(&self) -> bool {
        KNOWN_LEG_TYPES.contains(&self.leg_type.as_str())
    }
}

impl Record for TripLeg {
    type Id = TripLegId;
    const KIND: &'static str = "trip leg";

    fn id(&self) -> &TripLegId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(leg_type: &str) -> TripLeg {
        TripLeg::new(
            TripLegId::from("leg123"),
            NewTripLeg {
                trip_id: TripId::from("trip123"),
                start_location: String::from("New York"),
                destination: String::from("Los Angeles"),
                transport_provider: String::from("Airline"),
                transport_mode: String::from("Flight"),
                leg_type: leg_type.to_string(),
                cost: 500,
            },
        )
    }

    #[test]
    fn leg_type_is_free_text() {
        assert!(leg(LEG_TRANSFER).has_known_type());
        assert!(!leg("cruise").has_known_type());
    }

    #[test]
    fn bad_cost_is_skipped() {
        let mut leg = leg(LEG_TRANSFER);
        let rejected = leg.apply(TripLegPatch {
            destination: Some(String::from("San Francisco")),
            cost: Some(String::from("lots")),
            ..Default::default()
        });

        assert_eq!(leg.destination, "San Francisco");
        assert_eq!(leg.cost, 500);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, "cost");
    }
}
