use crate::{Traveler, Trip, TripLeg, User, collection::Collection, users::DEFAULT_ADMIN_PASSWORD};

mod legs;
mod memberships;
mod reports;
mod travelers;
mod trips;
mod users;

/// The record store.
///
/// Operations take `&mut self` for writes, so a single owner runs them one
/// at a time. Every operation that touches two collections (leg create and
/// delete, traveler membership) checks all of its preconditions before it
/// mutates anything.
#[derive(Debug)]
pub struct Engine {
    trips: Collection<Trip>,
    travelers: Collection<Traveler>,
    legs: Collection<TripLeg>,
    users: Collection<User>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The builder for `Engine`
#[derive(Debug)]
pub struct EngineBuilder {
    admin_password: String,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl EngineBuilder {
    /// Password of the seeded administrator account.
    pub fn admin_password(mut self, password: impl Into<String>) -> EngineBuilder {
        self.admin_password = password.into();
        self
    }

    /// Construct `Engine` with empty collections and the seeded administrator.
    pub fn build(self) -> Engine {
        let mut users = Collection::default();
        users.push(User::seeded_admin(self.admin_password));
        tracing::debug!("record store ready, administrator seeded");

        Engine {
            trips: Collection::default(),
            travelers: Collection::default(),
            legs: Collection::default(),
            users,
        }
    }
}
