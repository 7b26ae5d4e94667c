//! In-memory record store for trips, travelers, trip legs and users.
//!
//! The [`Engine`] owns the four collections and is the only way to change
//! them. Records reference each other by typed id; the store keeps the
//! references consistent where it is asked to (a trip leg's trip, a trip's
//! leg list) and leaves the rest loose on purpose:
//!
//! - deleting a trip keeps its legs and does not touch travelers;
//! - deleting a traveler does not remove it from the trips listing it;
//! - a trip's coordinator is stored as given and may not resolve.

pub use error::EngineError;
pub use ids::{TravelerId, TripId, TripLegId, UserId, UserRef};
pub use legs::{
    KNOWN_LEG_TYPES, LEG_ACCOMMODATION, LEG_POI, LEG_TRANSFER, NewTripLeg, TripLeg, TripLegPatch,
};
pub use ops::{Engine, EngineBuilder};
pub use reports::{FinancialReport, LegTypeSummary, ModeCount, TripCost};
pub use travelers::{NewTraveler, Traveler, TravelerPatch};
pub use trips::{NewTrip, Trip, TripPatch};
pub use users::{
    DEFAULT_ADMIN_PASSWORD, NewUser, Role, SEEDED_ADMIN_ID, SEEDED_ADMIN_USERNAME, User, UserPatch,
};
pub use util::{
    DATE_FORMAT, FieldRejection, MAX_COST, UpdateOutcome, parse_cost, parse_date, parse_duration,
};

mod collection;
mod error;
mod ids;
mod legs;
mod ops;
mod reports;
mod travelers;
mod trips;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
