use crate::{NewTrip, ResultEngine, Trip, TripId, TripPatch, UpdateOutcome, User};

use super::Engine;

impl Engine {
    /// Creates a trip with no travelers and no legs, returning its id.
    pub fn new_trip(&mut self, fields: NewTrip) -> TripId {
        let id = self.trips.issue_id();
        self.trips.push(Trip::new(id.clone(), fields));
        tracing::debug!("trip {id} created");
        id
    }

    /// All trips in insertion order.
    pub fn trips(&self) -> &[Trip] {
        self.trips.as_slice()
    }

    pub fn trip(&self, trip_id: &TripId) -> ResultEngine<&Trip> {
        self.trips.get(trip_id)
    }

    /// Applies the fields present in `patch`. Fields that fail to parse are
    /// reported in the outcome and left unchanged.
    pub fn update_trip(
        &mut self,
        trip_id: &TripId,
        patch: TripPatch,
    ) -> ResultEngine<UpdateOutcome<Trip>> {
        let trip = self.trips.get_mut(trip_id)?;
        let rejected = trip.apply(patch);
        tracing::debug!("trip {trip_id} updated, {} field(s) rejected", rejected.len());

        Ok(UpdateOutcome {
            record: trip.clone(),
            rejected,
        })
    }

    /// Removes the trip and returns it.
    ///
    /// Legs pointing at the trip stay in the leg collection and travelers are
    /// left untouched.
    pub fn delete_trip(&mut self, trip_id: &TripId) -> ResultEngine<Trip> {
        let trip = self.trips.remove(trip_id)?;
        tracing::debug!("trip {trip_id} deleted, {} leg(s) left behind", trip.legs.len());
        Ok(trip)
    }

    /// Resolves the trip's coordinator reference. `Ok(None)` when it dangles.
    pub fn coordinator_of(&self, trip_id: &TripId) -> ResultEngine<Option<&User>> {
        let trip = self.trips.get(trip_id)?;
        Ok(self.users.find(&trip.coordinator.target()))
    }
}
