use crate::{EngineError, ResultEngine, TravelerId, TripId};

use super::Engine;

impl Engine {
    /// Adds a traveler to a trip.
    ///
    /// Both ids must resolve ([`EngineError::ReferenceNotFound`]); a traveler
    /// already on the trip is reported as [`EngineError::ExistingKey`] and the
    /// trip is left as it is.
    pub fn add_traveler_to_trip(
        &mut self,
        trip_id: &TripId,
        traveler_id: &TravelerId,
    ) -> ResultEngine<()> {
        if !self.travelers.contains(traveler_id) {
            return Err(EngineError::ReferenceNotFound(format!(
                "traveler {traveler_id}"
            )));
        }
        let trip = self
            .trips
            .get_mut(trip_id)
            .map_err(|_| EngineError::ReferenceNotFound(format!("trip {trip_id}")))?;
        if trip.travelers.contains(traveler_id) {
            return Err(EngineError::ExistingKey(format!(
                "traveler {traveler_id} on trip {trip_id}"
            )));
        }

        trip.travelers.push(traveler_id.clone());
        tracing::debug!("traveler {traveler_id} added to trip {trip_id}");
        Ok(())
    }

    /// Removes a traveler from a trip.
    ///
    /// Only the trip's list is checked, so a traveler that was deleted from
    /// the traveler collection can still be detached.
    pub fn remove_traveler_from_trip(
        &mut self,
        trip_id: &TripId,
        traveler_id: &TravelerId,
    ) -> ResultEngine<()> {
        let trip = self.trips.get_mut(trip_id)?;
        let index = trip
            .travelers
            .iter()
            .position(|id| id == traveler_id)
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("traveler {traveler_id} on trip {trip_id}"))
            })?;

        trip.travelers.remove(index);
        tracing::debug!("traveler {traveler_id} removed from trip {trip_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::NaiveDate;

    use crate::{NewTraveler, NewTrip, UserRef};

    use super::*;

    fn setup() -> (Engine, TripId, TravelerId) {
        let mut engine = Engine::default();
        let trip_id = engine.new_trip(NewTrip {
            name: String::from("Test Trip"),
            start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            duration: NonZeroU32::new(5).unwrap(),
            coordinator: UserRef::from("John Doe"),
            contact: String::from("1234567890"),
        });
        let traveler_id = engine.new_traveler(NewTraveler {
            name: String::from("John Doe"),
            address: String::from("123 Main St"),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            emergency_contact: String::from("9876543210"),
            gov_id_type: String::from("Passport"),
            gov_id_number: String::from("A1234567"),
        });
        (engine, trip_id, traveler_id)
    }

    #[test]
    fn add_twice_is_a_conflict() {
        let (mut engine, trip_id, traveler_id) = setup();

        engine.add_traveler_to_trip(&trip_id, &traveler_id).unwrap();
        assert!(matches!(
            engine.add_traveler_to_trip(&trip_id, &traveler_id),
            Err(EngineError::ExistingKey(_))
        ));
        assert_eq!(engine.trip(&trip_id).unwrap().travelers, vec![traveler_id]);
    }

    #[test]
    fn add_with_unknown_ids() {
        let (mut engine, trip_id, traveler_id) = setup();

        assert!(matches!(
            engine.add_traveler_to_trip(&TripId::from("nope"), &traveler_id),
            Err(EngineError::ReferenceNotFound(_))
        ));
        assert!(matches!(
            engine.add_traveler_to_trip(&trip_id, &TravelerId::from("nope")),
            Err(EngineError::ReferenceNotFound(_))
        ));
        assert!(engine.trip(&trip_id).unwrap().travelers.is_empty());
    }

    #[test]
    fn remove_traveler() {
        let (mut engine, trip_id, traveler_id) = setup();
        engine.add_traveler_to_trip(&trip_id, &traveler_id).unwrap();

        engine
            .remove_traveler_from_trip(&trip_id, &traveler_id)
            .unwrap();
        assert!(engine.trip(&trip_id).unwrap().travelers.is_empty());
        assert!(matches!(
            engine.remove_traveler_from_trip(&trip_id, &traveler_id),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn deleted_traveler_stays_on_trip() {
        let (mut engine, trip_id, traveler_id) = setup();
        engine.add_traveler_to_trip(&trip_id, &traveler_id).unwrap();

        engine.delete_traveler(&traveler_id).unwrap();
        assert_eq!(
            engine.trip(&trip_id).unwrap().travelers,
            vec![traveler_id.clone()]
        );

        engine
            .remove_traveler_from_trip(&trip_id, &traveler_id)
            .unwrap();
        assert!(engine.trip(&trip_id).unwrap().travelers.is_empty());
    }
}
