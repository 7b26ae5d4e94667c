//! Plain text rendering of records and reports.

use std::io::{self, Write};

use engine::{
    DATE_FORMAT, FieldRejection, FinancialReport, LegTypeSummary, ModeCount, Traveler, Trip,
    TripLeg, User,
};

const SEPARATOR: &str = "------------------------------";

pub fn trips(out: &mut impl Write, trips: &[Trip]) -> io::Result<()> {
    writeln!(out, "\n=== All Trips ===")?;
    if trips.is_empty() {
        return writeln!(out, "No trips found.");
    }

    for trip in trips {
        writeln!(out, "ID: {}", trip.id)?;
        writeln!(out, "Name: {}", trip.name)?;
        writeln!(out, "Start Date: {}", trip.start_date.format(DATE_FORMAT))?;
        writeln!(out, "Duration: {} days", trip.duration)?;
        writeln!(out, "Coordinator: {}", trip.coordinator)?;
        writeln!(out, "Number of Travelers: {}", trip.travelers.len())?;
        writeln!(out, "Number of Trip Legs: {}", trip.legs.len())?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

/// A trip in full. `coordinator` is the resolved user, if any; each traveler
/// id is paired with the profile it still resolves to.
pub fn trip_detail(
    out: &mut impl Write,
    trip: &Trip,
    coordinator: Option<&User>,
    travelers: &[(&str, Option<&Traveler>)],
    legs: &[&TripLeg],
    total_cost: u64,
    cost_per_traveler: f64,
) -> io::Result<()> {
    writeln!(out, "\n=== Trip {} ===", trip.id)?;
    writeln!(out, "Name: {}", trip.name)?;
    writeln!(
        out,
        "Dates: {} - {} ({} days)",
        trip.start_date.format(DATE_FORMAT),
        trip.end_date().format(DATE_FORMAT),
        trip.duration
    )?;
    match coordinator {
        Some(user) => writeln!(out, "Coordinator: {} ({})", user.username, user.id)?,
        None => writeln!(out, "Coordinator: {} (unknown user)", trip.coordinator)?,
    }
    writeln!(out, "Contact: {}", trip.contact)?;

    writeln!(out, "Travelers:")?;
    if travelers.is_empty() {
        writeln!(out, "  none")?;
    }
    for (id, traveler) in travelers {
        match traveler {
            Some(traveler) => writeln!(out, "  {id}: {}", traveler.name)?,
            None => writeln!(out, "  {id}: (deleted traveler)")?,
        }
    }

    writeln!(out, "Legs:")?;
    if legs.is_empty() {
        writeln!(out, "  none")?;
    }
    for leg in legs {
        writeln!(
            out,
            "  {}: {} -> {} by {} ({}), ${}",
            leg.id, leg.start_location, leg.destination, leg.transport_mode, leg.leg_type, leg.cost
        )?;
    }
    writeln!(out, "Total Cost: ${total_cost}")?;
    writeln!(out, "Cost per Traveler: ${cost_per_traveler:.2}")
}

pub fn travelers(out: &mut impl Write, travelers: &[Traveler]) -> io::Result<()> {
    writeln!(out, "\n=== All Travelers ===")?;
    if travelers.is_empty() {
        return writeln!(out, "No travelers found.");
    }

    for traveler in travelers {
        writeln!(out, "ID: {}", traveler.id)?;
        writeln!(out, "Name: {}", traveler.name)?;
        writeln!(out, "Date of Birth: {}", traveler.dob.format(DATE_FORMAT))?;
        writeln!(out, "ID Type: {}", traveler.gov_id_type)?;
        writeln!(out, "ID Number: {}", traveler.gov_id_number)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

pub fn legs<'a>(
    out: &mut impl Write,
    title: &str,
    legs: impl IntoIterator<Item = &'a TripLeg>,
) -> io::Result<()> {
    writeln!(out, "\n=== {title} ===")?;
    let mut any = false;
    for leg in legs {
        any = true;
        writeln!(out, "ID: {}", leg.id)?;
        writeln!(out, "Trip ID: {}", leg.trip_id)?;
        writeln!(out, "Route: {} -> {}", leg.start_location, leg.destination)?;
        writeln!(out, "Provider: {}", leg.transport_provider)?;
        writeln!(out, "Mode: {}", leg.transport_mode)?;
        writeln!(out, "Type: {}", leg.leg_type)?;
        writeln!(out, "Cost: ${}", leg.cost)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    if !any {
        writeln!(out, "No trip legs found.")?;
    }
    Ok(())
}

pub fn users(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    writeln!(out, "\n=== All Users ===")?;
    if users.is_empty() {
        return writeln!(out, "No users found.");
    }

    for user in users {
        writeln!(out, "ID: {}", user.id)?;
        writeln!(out, "Username: {}", user.username)?;
        writeln!(out, "Role: {}", user.role)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

pub fn rejections(out: &mut impl Write, rejected: &[FieldRejection]) -> io::Result<()> {
    for rejection in rejected {
        writeln!(
            out,
            "{}. The {} field was not updated.",
            rejection.reason, rejection.field
        )?;
    }
    Ok(())
}

pub fn financial(out: &mut impl Write, report: &FinancialReport) -> io::Result<()> {
    writeln!(out, "\n=== Financial Report ===")?;
    if report.is_empty() {
        return writeln!(out, "No trips found.");
    }

    for row in &report.trips {
        writeln!(
            out,
            "{}: ${} ({} travelers, ${:.2} per traveler)",
            row.name, row.total_cost, row.travelers, row.cost_per_traveler
        )?;
    }
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Total Revenue: ${}", report.total_revenue)
}

pub fn transport_modes(out: &mut impl Write, modes: &[ModeCount]) -> io::Result<()> {
    writeln!(out, "\n=== Transport Mode Frequency ===")?;
    if modes.is_empty() {
        return writeln!(out, "No trip legs found.");
    }

    for mode in modes {
        writeln!(out, "{}: {} leg(s)", mode.transport_mode, mode.legs)?;
    }
    Ok(())
}

pub fn leg_types(out: &mut impl Write, summaries: &[LegTypeSummary]) -> io::Result<()> {
    writeln!(out, "\n=== Leg Types ===")?;
    if summaries.is_empty() {
        return writeln!(out, "No trip legs found.");
    }

    for summary in summaries {
        writeln!(
            out,
            "{}: {} leg(s), ${}",
            summary.leg_type, summary.legs, summary.total_cost
        )?;
    }
    Ok(())
}
