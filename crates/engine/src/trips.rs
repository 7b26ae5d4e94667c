//! The module contains the `Trip` record.
//!
//! A trip only *references* its travelers and legs by id: the vectors hold
//! keys into the traveler and trip leg collections, never the records.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    FieldRejection, TravelerId, TripId, TripLegId, UserRef,
    collection::Record,
    util::{Patcher, parse_date, parse_duration},
};

/// A planned journey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub start_date: NaiveDate,
    /// Length in days.
    pub duration: NonZeroU32,
    /// Not validated: may name a user that does not exist.
    pub coordinator: UserRef,
    pub contact: String,
    pub travelers: Vec<TravelerId>,
    /// Kept in sync by trip leg creation and deletion.
    pub legs: Vec<TripLegId>,
}

/// Fields needed to create a [`Trip`].
#[derive(Clone, Debug)]
pub struct NewTrip {
    pub name: String,
    pub start_date: NaiveDate,
    pub duration: NonZeroU32,
    pub coordinator: UserRef,
    pub contact: String,
}

/// Partial update of a [`Trip`]. `None` leaves the field as it is.
#[derive(Clone, Debug, Default)]
pub struct TripPatch {
    pub name: Option<String>,
    /// `DD/MM/YYYY`.
    pub start_date: Option<String>,
    pub duration: Option<String>,
    pub coordinator: Option<String>,
    pub contact: Option<String>,
}

impl Trip {
    pub(crate) fn new(id: TripId, fields: NewTrip) -> Self {
        Self {
            id,
            name: fields.name,
            start_date: fields.start_date,
            duration: fields.duration,
            coordinator: fields.coordinator,
            contact: fields.contact,
            travelers: Vec::new(),
            legs: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, patch: TripPatch) -> Vec<FieldRejection> {
        let mut patcher = Patcher::default();
        patcher.text(&mut self.name, patch.name);
        patcher.parsed(&mut self.start_date, patch.start_date, |raw| {
            parse_date("start_date", raw)
        });
        patcher.parsed(&mut self.duration, patch.duration, |raw| {
            parse_duration("duration", raw)
        });
        if let Some(coordinator) = patch.coordinator {
            self.coordinator = UserRef::new(coordinator);
        }
        patcher.text(&mut self.contact, patch.contact);
        patcher.finish()
    }

    /// Last day of the trip, counting the start date as day one.
    pub fn end_date(&self) -> NaiveDate {
        let extra = chrono::Days::new(u64::from(self.duration.get() - 1));
        self.start_date
            .checked_add_days(extra)
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Record for Trip {
    type Id = TripId;
    const KIND: &'static str = "trip";

    fn id(&self) -> &TripId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> Trip {
        Trip::new(
            TripId::from("trip123"),
            NewTrip {
                name: String::from("Test Trip"),
                start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
                duration: NonZeroU32::new(5).unwrap(),
                coordinator: UserRef::from("John Doe"),
                contact: String::from("1234567890"),
            },
        )
    }

    #[test]
    fn new_trip_starts_without_references() {
        let trip = trip();
        assert!(trip.travelers.is_empty());
        assert!(trip.legs.is_empty());
    }

    #[test]
    fn end_date_counts_start_as_day_one() {
        assert_eq!(
            trip().end_date(),
            NaiveDate::from_ymd_opt(2023, 10, 5).unwrap()
        );
    }

    #[test]
    fn apply_keeps_bad_fields_and_applies_the_rest() {
        let mut trip = trip();
        let rejected = trip.apply(TripPatch {
            name: Some(String::from("Updated Trip")),
            start_date: Some(String::from("2023/10/01")),
            duration: Some(String::from("x")),
            coordinator: None,
            contact: Some(String::new()),
        });

        assert_eq!(trip.name, "Updated Trip");
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        assert_eq!(trip.duration.get(), 5);
        assert_eq!(trip.coordinator.as_str(), "John Doe");
        assert_eq!(trip.contact, "");
        let fields: Vec<_> = rejected.iter().map(|r| r.field).collect();
        assert_eq!(fields, vec!["start_date", "duration"]);
    }
}
