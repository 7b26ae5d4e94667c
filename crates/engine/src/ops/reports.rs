use crate::{FinancialReport, LegTypeSummary, ModeCount, TripCost, TripId};

use super::Engine;

impl Engine {
    /// Sum of the costs of the trip's legs; 0 without legs.
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn total_cost(&self, trip_id: &TripId) -> u64 {
        add_costs(self.legs_for_trip(trip_id).map(|leg| leg.cost))
    }

    /// Total cost split across the trip's travelers; 0 when it has none.
    pub fn cost_per_traveler(&self, trip_id: &TripId) -> f64 {
        let travelers = self
            .trips
            .find(trip_id)
            .map_or(0, |trip| trip.travelers.len());
        per_head(self.total_cost(trip_id), travelers)
    }

    /// Number of legs per transport mode, in first-seen order.
    pub fn transport_mode_frequency(&self) -> Vec<ModeCount> {
        let mut counts: Vec<ModeCount> = Vec::new();
        for leg in self.legs.iter() {
            match counts
                .iter_mut()
                .find(|count| count.transport_mode == leg.transport_mode)
            {
                Some(count) => count.legs += 1,
                None => counts.push(ModeCount {
                    transport_mode: leg.transport_mode.clone(),
                    legs: 1,
                }),
            }
        }
        counts
    }

    /// Leg count and cost per leg type, in first-seen order.
    pub fn leg_type_breakdown(&self) -> Vec<LegTypeSummary> {
        let mut summaries: Vec<LegTypeSummary> = Vec::new();
        for leg in self.legs.iter() {
            match summaries
                .iter_mut()
                .find(|summary| summary.leg_type == leg.leg_type)
            {
                Some(summary) => {
                    summary.legs += 1;
                    summary.total_cost = summary.total_cost.saturating_add(leg.cost);
                }
                None => summaries.push(LegTypeSummary {
                    leg_type: leg.leg_type.clone(),
                    legs: 1,
                    total_cost: leg.cost,
                }),
            }
        }
        summaries
    }

    /// One row per trip plus the revenue over all of them.
    ///
    /// Legs whose trip was deleted do not count towards the revenue.
    pub fn financial_report(&self) -> FinancialReport {
        let trips: Vec<TripCost> = self
            .trips
            .iter()
            .map(|trip| {
                let total_cost = self.total_cost(&trip.id);
                TripCost {
                    trip_id: trip.id.clone(),
                    name: trip.name.clone(),
                    total_cost,
                    travelers: trip.travelers.len(),
                    cost_per_traveler: per_head(total_cost, trip.travelers.len()),
                }
            })
            .collect();
        let total_revenue = add_costs(trips.iter().map(|row| row.total_cost));

        FinancialReport {
            trips,
            total_revenue,
        }
    }
}

fn add_costs(costs: impl IntoIterator<Item = u64>) -> u64 {
    costs.into_iter().fold(0, u64::saturating_add)
}

fn per_head(total: u64, heads: usize) -> f64 {
    if heads == 0 {
        return 0.0;
    }
    total as f64 / heads as f64
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::NaiveDate;

    use crate::{
        LEG_ACCOMMODATION, LEG_TRANSFER, NewTraveler, NewTrip, NewTripLeg, TravelerId, UserRef,
    };

    use super::*;

    fn trip(engine: &mut Engine, name: &str) -> TripId {
        engine.new_trip(NewTrip {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            duration: NonZeroU32::new(5).unwrap(),
            coordinator: UserRef::from("John Doe"),
            contact: String::from("1234567890"),
        })
    }

    fn leg(engine: &mut Engine, trip_id: &TripId, mode: &str, leg_type: &str, cost: u64) {
        engine
            .new_trip_leg(NewTripLeg {
                trip_id: trip_id.clone(),
                start_location: String::from("New York"),
                destination: String::from("Los Angeles"),
                transport_provider: String::from("Airline"),
                transport_mode: mode.to_string(),
                leg_type: leg_type.to_string(),
                cost,
            })
            .unwrap();
    }

    fn traveler(engine: &mut Engine, name: &str) -> TravelerId {
        engine.new_traveler(NewTraveler {
            name: name.to_string(),
            address: String::from("123 Main St"),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            emergency_contact: String::from("9876543210"),
            gov_id_type: String::from("Passport"),
            gov_id_number: String::from("A1234567"),
        })
    }

    #[test]
    fn total_cost() {
        let mut engine = Engine::default();
        let with_leg = trip(&mut engine, "Test Trip");
        let without_legs = trip(&mut engine, "Empty");
        leg(&mut engine, &with_leg, "Flight", LEG_TRANSFER, 500);

        assert_eq!(engine.total_cost(&with_leg), 500);
        assert_eq!(engine.total_cost(&without_legs), 0);
    }

    #[test]
    fn cost_per_traveler_without_travelers_is_zero() {
        let mut engine = Engine::default();
        let trip_id = trip(&mut engine, "Test Trip");
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 500);

        assert_eq!(engine.cost_per_traveler(&trip_id), 0.0);
        assert_eq!(engine.cost_per_traveler(&TripId::from("missing")), 0.0);
    }

    #[test]
    fn cost_per_traveler_splits_evenly() {
        let mut engine = Engine::default();
        let trip_id = trip(&mut engine, "Test Trip");
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 500);
        for name in ["A", "B"] {
            let traveler_id = traveler(&mut engine, name);
            engine.add_traveler_to_trip(&trip_id, &traveler_id).unwrap();
        }

        assert_eq!(engine.cost_per_traveler(&trip_id), 250.0);
    }

    #[test]
    fn transport_modes_in_first_seen_order() {
        let mut engine = Engine::default();
        let trip_id = trip(&mut engine, "Test Trip");
        leg(&mut engine, &trip_id, "Train", LEG_TRANSFER, 1);
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 1);
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 1);
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 1);
        leg(&mut engine, &trip_id, "Train", LEG_TRANSFER, 1);

        let modes: Vec<_> = engine
            .transport_mode_frequency()
            .into_iter()
            .map(|m| (m.transport_mode, m.legs))
            .collect();
        assert_eq!(
            modes,
            vec![(String::from("Train"), 2), (String::from("Flight"), 3)]
        );
    }

    #[test]
    fn empty_store_has_empty_reports() {
        let engine = Engine::default();
        assert!(engine.transport_mode_frequency().is_empty());
        assert!(engine.leg_type_breakdown().is_empty());
        assert!(engine.financial_report().is_empty());
        assert_eq!(engine.financial_report().total_revenue, 0);
    }

    #[test]
    fn leg_type_breakdown_sums_costs() {
        let mut engine = Engine::default();
        let trip_id = trip(&mut engine, "Test Trip");
        leg(&mut engine, &trip_id, "Flight", LEG_TRANSFER, 500);
        leg(&mut engine, &trip_id, "Walk", LEG_ACCOMMODATION, 120);
        leg(&mut engine, &trip_id, "Bus", LEG_TRANSFER, 30);

        let breakdown = engine.leg_type_breakdown();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].leg_type, LEG_TRANSFER);
        assert_eq!(breakdown[0].legs, 2);
        assert_eq!(breakdown[0].total_cost, 530);
        assert_eq!(breakdown[1].total_cost, 120);
    }

    #[test]
    fn huge_costs_saturate() {
        let mut engine = Engine::default();
        let first = trip(&mut engine, "First");
        let second = trip(&mut engine, "Second");
        leg(&mut engine, &first, "Flight", LEG_TRANSFER, u64::MAX);
        leg(&mut engine, &first, "Flight", LEG_TRANSFER, u64::MAX);
        leg(&mut engine, &second, "Flight", LEG_TRANSFER, 1);

        assert_eq!(engine.total_cost(&first), u64::MAX);
        assert_eq!(engine.leg_type_breakdown()[0].total_cost, u64::MAX);
        let report = engine.financial_report();
        assert_eq!(report.trips[0].total_cost, u64::MAX);
        assert_eq!(report.trips[1].total_cost, 1);
        assert_eq!(report.total_revenue, u64::MAX);
    }

    #[test]
    fn financial_report_ignores_orphaned_legs() {
        let mut engine = Engine::default();
        let kept = trip(&mut engine, "Test Trip");
        let dropped = trip(&mut engine, "Dropped");
        leg(&mut engine, &kept, "Flight", LEG_TRANSFER, 500);
        leg(&mut engine, &dropped, "Flight", LEG_TRANSFER, 900);
        engine.delete_trip(&dropped).unwrap();

        let report = engine.financial_report();
        assert_eq!(report.trips.len(), 1);
        assert_eq!(report.trips[0].name, "Test Trip");
        assert_eq!(report.trips[0].total_cost, 500);
        assert_eq!(report.total_revenue, 500);
    }
}
