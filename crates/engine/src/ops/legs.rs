use crate::{
    EngineError, NewTripLeg, ResultEngine, TripId, TripLeg, TripLegId, TripLegPatch, UpdateOutcome,
};

use super::Engine;

impl Engine {
    /// Creates a leg on an existing trip and appends its id to the trip's legs.
    ///
    /// Fails with [`EngineError::ReferenceNotFound`] when the trip does not
    /// exist, in which case neither collection changes.
    pub fn new_trip_leg(&mut self, fields: NewTripLeg) -> ResultEngine<TripLegId> {
        let trip = self
            .trips
            .get_mut(&fields.trip_id)
            .map_err(|_| EngineError::ReferenceNotFound(format!("trip {}", fields.trip_id)))?;

        let id = self.legs.issue_id();
        trip.legs.push(id.clone());
        self.legs.push(TripLeg::new(id.clone(), fields));
        tracing::debug!("trip leg {id} created on trip {}", trip.id);
        Ok(id)
    }

    /// All legs in insertion order, including legs of deleted trips.
    pub fn trip_legs(&self) -> &[TripLeg] {
        self.legs.as_slice()
    }

    pub fn trip_leg(&self, leg_id: &TripLegId) -> ResultEngine<&TripLeg> {
        self.legs.get(leg_id)
    }

    /// Legs whose `trip_id` is `trip_id`, in insertion order.
    pub fn legs_for_trip<'a>(&'a self, trip_id: &'a TripId) -> impl Iterator<Item = &'a TripLeg> {
        self.legs.iter().filter(move |leg| &leg.trip_id == trip_id)
    }

    pub fn update_trip_leg(
        &mut self,
        leg_id: &TripLegId,
        patch: TripLegPatch,
    ) -> ResultEngine<UpdateOutcome<TripLeg>> {
        let leg = self.legs.get_mut(leg_id)?;
        let rejected = leg.apply(patch);
        tracing::debug!("trip leg {leg_id} updated, {} field(s) rejected", rejected.len());

        Ok(UpdateOutcome {
            record: leg.clone(),
            rejected,
        })
    }

    /// Removes the leg and drops its id from the owning trip, if that trip
    /// still exists.
    pub fn delete_trip_leg(&mut self, leg_id: &TripLegId) -> ResultEngine<TripLeg> {
        let leg = self.legs.remove(leg_id)?;
        if let Ok(trip) = self.trips.get_mut(&leg.trip_id)
            && let Some(index) = trip.legs.iter().position(|id| id == leg_id)
        {
            trip.legs.remove(index);
        }
        tracing::debug!("trip leg {leg_id} deleted");
        Ok(leg)
    }
}
