//! The module contains the `Traveler` record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    FieldRejection, TravelerId,
    collection::Record,
    util::{Patcher, parse_date},
};

/// A person profile. Trip membership lives on [`Trip::travelers`](crate::Trip::travelers).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Traveler {
    pub id: TravelerId,
    pub name: String,
    pub address: String,
    pub dob: NaiveDate,
    pub emergency_contact: String,
    pub gov_id_type: String,
    pub gov_id_number: String,
}

#[derive(Clone, Debug)]
pub struct NewTraveler {
    pub name: String,
    pub address: String,
    pub dob: NaiveDate,
    pub emergency_contact: String,
    pub gov_id_type: String,
    pub gov_id_number: String,
}

/// Partial update of a [`Traveler`]. `None` leaves the field as it is.
#[derive(Clone, Debug, Default)]
pub struct TravelerPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    /// `DD/MM/YYYY`.
    pub dob: Option<String>,
    pub emergency_contact: Option<String>,
    pub gov_id_type: Option<String>,
    pub gov_id_number: Option<String>,
}

impl Traveler {
    pub(crate) fn new(id: TravelerId, fields: NewTraveler) -> Self {
        Self {
            id,
            name: fields.name,
            address: fields.address,
            dob: fields.dob,
            emergency_contact: fields.emergency_contact,
            gov_id_type: fields.gov_id_type,
            gov_id_number: fields.gov_id_number,
        }
    }

    pub(crate) fn apply(&mut self, patch: TravelerPatch) -> Vec<FieldRejection> {
        let mut patcher = Patcher::default();
        patcher.text(&mut self.name, patch.name);
        patcher.text(&mut self.address, patch.address);
        patcher.parsed(&mut self.dob, patch.dob, |raw| parse_date("dob", raw));
        patcher.text(&mut self.emergency_contact, patch.emergency_contact);
        patcher.text(&mut self.gov_id_type, patch.gov_id_type);
        patcher.text(&mut self.gov_id_number, patch.gov_id_number);
        patcher.finish()
    }
}

impl Record for Traveler {
    type Id = TravelerId;
    const KIND: &'static str = "traveler";

    fn id(&self) -> &TravelerId {
        &self.id
    }
}
