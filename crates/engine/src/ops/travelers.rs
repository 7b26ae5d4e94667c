use crate::{NewTraveler, ResultEngine, Traveler, TravelerId, TravelerPatch, UpdateOutcome};

use super::Engine;

impl Engine {
    pub fn new_traveler(&mut self, fields: NewTraveler) -> TravelerId {
        let id = self.travelers.issue_id();
        self.travelers.push(Traveler::new(id.clone(), fields));
        tracing::debug!("traveler {id} created");
        id
    }

    pub fn travelers(&self) -> &[Traveler] {
        self.travelers.as_slice()
    }

    pub fn traveler(&self, traveler_id: &TravelerId) -> ResultEngine<&Traveler> {
        self.travelers.get(traveler_id)
    }

    pub fn update_traveler(
        &mut self,
        traveler_id: &TravelerId,
        patch: TravelerPatch,
    ) -> ResultEngine<UpdateOutcome<Traveler>> {
        let traveler = self.travelers.get_mut(traveler_id)?;
        let rejected = traveler.apply(patch);
        tracing::debug!(
            "traveler {traveler_id} updated, {} field(s) rejected",
            rejected.len()
        );

        Ok(UpdateOutcome {
            record: traveler.clone(),
            rejected,
        })
    }

    /// Removes the traveler. Trips that list it keep the id.
    pub fn delete_traveler(&mut self, traveler_id: &TravelerId) -> ResultEngine<Traveler> {
        let traveler = self.travelers.remove(traveler_id)?;
        tracing::debug!("traveler {traveler_id} deleted");
        Ok(traveler)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::EngineError;

    use super::*;

    fn jane() -> NewTraveler {
        NewTraveler {
            name: String::from("Jane Doe"),
            address: String::from("456 Elm St"),
            dob: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            emergency_contact: String::from("1234567890"),
            gov_id_type: String::from("Driver's License"),
            gov_id_number: String::from("B9876543"),
        }
    }

    #[test]
    fn create_traveler() {
        let mut engine = Engine::default();
        let id = engine.new_traveler(jane());

        let traveler = engine.traveler(&id).unwrap();
        assert_eq!(traveler.name, "Jane Doe");
        assert_eq!(traveler.dob, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap());
    }

    #[test]
    fn update_traveler() {
        let mut engine = Engine::default();
        let id = engine.new_traveler(jane());

        let outcome = engine
            .update_traveler(
                &id,
                TravelerPatch {
                    name: Some(String::from("Updated Name")),
                    address: Some(String::from("Updated Address")),
                    dob: Some(String::from("02/02/1992")),
                    emergency_contact: Some(String::from("1111111111")),
                    gov_id_type: Some(String::from("ID Card")),
                    gov_id_number: Some(String::from("C1234567")),
                },
            )
            .unwrap();

        assert!(outcome.is_complete());
        let traveler = engine.traveler(&id).unwrap();
        assert_eq!(traveler.name, "Updated Name");
        assert_eq!(traveler.dob, NaiveDate::from_ymd_opt(1992, 2, 2).unwrap());
        assert_eq!(traveler.gov_id_number, "C1234567");
    }

    #[test]
    fn bad_dob_keeps_previous_value() {
        let mut engine = Engine::default();
        let id = engine.new_traveler(jane());

        let outcome = engine
            .update_traveler(
                &id,
                TravelerPatch {
                    dob: Some(String::from("not a date")),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(outcome.rejected[0].field, "dob");
        assert_eq!(
            engine.traveler(&id).unwrap().dob,
            NaiveDate::from_ymd_opt(1995, 1, 1).unwrap()
        );
    }

    #[test]
    fn delete_traveler() {
        let mut engine = Engine::default();
        let id = engine.new_traveler(jane());

        let removed = engine.delete_traveler(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(engine.travelers().is_empty());
        assert!(matches!(
            engine.delete_traveler(&id),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
