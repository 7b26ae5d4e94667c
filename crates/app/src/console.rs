//! The interactive console.
//!
//! A session starts with a login; afterwards every line is a command. Role
//! checks happen here, before a command reaches the store: the store itself
//! runs whatever it is asked to.

use std::io::{BufRead, Write};

use clap::Parser;
use engine::{
    Engine, EngineError, KNOWN_LEG_TYPES, NewTraveler, NewTrip, NewTripLeg, NewUser, Role,
    TravelerId, TravelerPatch, TripId, TripLegId, TripLegPatch, TripPatch, UserId, UserPatch,
    UserRef, parse_cost, parse_duration,
};

use crate::{
    commands::{
        Command, LegCommand, Line, ReportCommand, TravelerCommand, TripCommand, UserCommand,
        split_line,
    },
    error::{AppError, Result},
    export,
    prompt::Prompter,
    render,
    settings::Settings,
};

const MAX_LOGIN_ATTEMPTS: usize = 3;

#[derive(Clone, Debug)]
struct Session {
    user_id: UserId,
    username: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Logout,
    Quit,
}

pub struct Console<R, W> {
    engine: Engine,
    io: Prompter<R, W>,
    prompt: String,
    export_dir: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(engine: Engine, io: Prompter<R, W>, settings: &Settings) -> Self {
        Self {
            engine,
            io,
            prompt: settings.console.prompt.clone(),
            export_dir: settings.reports.export_dir.clone(),
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Engine, W) {
        (self.engine, self.io.into_output())
    }

    /// Runs sessions until the user quits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.sessions() {
            Err(AppError::InputClosed) | Err(AppError::Interrupted) => {
                tracing::debug!("input ended, leaving");
                Ok(())
            }
            other => other,
        }
    }

    fn sessions(&mut self) -> Result<()> {
        writeln!(self.io.out(), "=== Travel Management System ===")?;
        loop {
            let Some(session) = self.login()? else {
                return Ok(());
            };
            if self.command_loop(&session)? == Flow::Quit {
                writeln!(self.io.out(), "Goodbye.")?;
                return Ok(());
            }
            tracing::info!("user {} logged out", session.username);
            writeln!(self.io.out(), "Logged out.")?;
        }
    }

    fn login(&mut self) -> Result<Option<Session>> {
        for attempt in 1..=MAX_LOGIN_ATTEMPTS {
            let username = self.io.required("Username: ")?;
            let password = self.io.password("Password: ")?;

            match self.engine.authenticate(&username, &password) {
                Ok(user) => {
                    tracing::info!("user {} logged in as {}", user.username, user.role);
                    writeln!(
                        self.io.out(),
                        "Welcome, {}! Logged in as {}.",
                        user.username,
                        user.role
                    )?;
                    return Ok(Some(Session {
                        user_id: user.id.clone(),
                        username: user.username.clone(),
                    }));
                }
                Err(_) => {
                    tracing::warn!("failed login for {username} (attempt {attempt})");
                    writeln!(self.io.out(), "Invalid username or password.")?;
                }
            }
        }

        writeln!(self.io.out(), "Too many failed attempts.")?;
        Ok(None)
    }

    fn command_loop(&mut self, session: &Session) -> Result<Flow> {
        loop {
            let line = self.io.line(&self.prompt)?;
            let words = match split_line(&line) {
                Ok(words) => words,
                Err(err) => {
                    writeln!(self.io.out(), "{err}")?;
                    continue;
                }
            };
            if words.is_empty() {
                continue;
            }

            let command = match Line::try_parse_from(words) {
                Ok(line) => line.command,
                Err(err) => {
                    write!(self.io.out(), "{}", err.render())?;
                    continue;
                }
            };

            // The role is read on every command: it may have been changed or
            // the account deleted since login.
            let Some(role) = self.current_role(session) else {
                writeln!(self.io.out(), "Your account no longer exists.")?;
                return Ok(Flow::Logout);
            };
            if let Some(required) = command.required_role()
                && !role.allows(required)
            {
                tracing::warn!("{} ({role}) refused {command:?}", session.username);
                writeln!(self.io.out(), "Access denied: {required} role required.")?;
                continue;
            }

            match self.dispatch(session, role, command) {
                Ok(Flow::Continue) => {}
                Ok(flow) => return Ok(flow),
                Err(AppError::Engine(err)) => self.engine_error(err)?,
                Err(err) => return Err(err),
            }
        }
    }

    fn current_role(&self, session: &Session) -> Option<Role> {
        self.engine.user(&session.user_id).ok().map(|user| user.role)
    }

    fn engine_error(&mut self, err: EngineError) -> Result<()> {
        if matches!(err, EngineError::Forbidden(_)) {
            tracing::warn!("{err}");
        }
        writeln!(self.io.out(), "{err}")?;
        Ok(())
    }

    fn dispatch(&mut self, session: &Session, role: Role, command: Command) -> Result<Flow> {
        match command {
            Command::Trip(command) => self.trip(command)?,
            Command::Traveler(command) => self.traveler(command)?,
            Command::Leg(command) => self.leg(command)?,
            Command::User(command) => self.user(command)?,
            Command::Report(command) => self.report(command)?,
            Command::Whoami => {
                writeln!(
                    self.io.out(),
                    "{} ({}, {role})",
                    session.username,
                    session.user_id
                )?;
            }
            Command::Logout => return Ok(Flow::Logout),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn trip(&mut self, command: TripCommand) -> Result<()> {
        match command {
            TripCommand::List => render::trips(self.io.out(), self.engine.trips())?,
            TripCommand::Create => {
                writeln!(self.io.out(), "\n=== Create New Trip ===")?;
                let name = self.io.required("Trip Name: ")?;
                let start_date = self.io.date("Start Date", "start_date")?;
                let duration = self.io.parsed(
                    "Duration (days): ",
                    "Please enter a valid number.",
                    |raw| parse_duration("duration", raw),
                )?;
                let coordinator = self.io.required("Trip Coordinator ID: ")?;
                let contact = self.io.required("Contact Information: ")?;

                let id = self.engine.new_trip(NewTrip {
                    name: name.clone(),
                    start_date,
                    duration,
                    coordinator: UserRef::new(coordinator),
                    contact,
                });
                writeln!(
                    self.io.out(),
                    "Trip '{name}' created successfully with ID: {id}"
                )?;
            }
            TripCommand::Show { id } => {
                let trip_id = TripId::from(id);
                let trip = self.engine.trip(&trip_id)?;
                let coordinator = self.engine.coordinator_of(&trip_id)?;
                let travelers: Vec<_> = trip
                    .travelers
                    .iter()
                    .map(|id| (id.as_str(), self.engine.traveler(id).ok()))
                    .collect();
                let legs: Vec<_> = self.engine.legs_for_trip(&trip_id).collect();
                render::trip_detail(
                    self.io.out(),
                    trip,
                    coordinator,
                    &travelers,
                    &legs,
                    self.engine.total_cost(&trip_id),
                    self.engine.cost_per_traveler(&trip_id),
                )?;
            }
            TripCommand::Update { id } => {
                let trip = self.engine.trip(&TripId::from(id))?.clone();
                writeln!(self.io.out(), "Updating Trip: {}", trip.name)?;
                let patch = TripPatch {
                    name: self.io.optional("Trip Name", &trip.name)?,
                    start_date: self.io.optional_date("Start Date", trip.start_date)?,
                    duration: self
                        .io
                        .optional("Duration (days)", &trip.duration.to_string())?,
                    coordinator: self
                        .io
                        .optional("Trip Coordinator ID", trip.coordinator.as_str())?,
                    contact: self.io.optional("Contact Information", &trip.contact)?,
                };

                let outcome = self.engine.update_trip(&trip.id, patch)?;
                render::rejections(self.io.out(), &outcome.rejected)?;
                writeln!(
                    self.io.out(),
                    "Trip '{}' updated successfully",
                    outcome.record.name
                )?;
            }
            TripCommand::Delete { id } => {
                let trip = self.engine.delete_trip(&TripId::from(id))?;
                writeln!(self.io.out(), "Trip '{}' deleted successfully", trip.name)?;
                if !trip.legs.is_empty() {
                    writeln!(
                        self.io.out(),
                        "{} trip leg(s) still reference trip {}.",
                        trip.legs.len(),
                        trip.id
                    )?;
                }
            }
            TripCommand::Legs { id } => {
                let trip_id = TripId::from(id);
                render::legs(
                    self.io.out(),
                    &format!("Trip Legs for {trip_id}"),
                    self.engine.legs_for_trip(&trip_id),
                )?;
            }
            TripCommand::AddTraveler {
                trip_id,
                traveler_id,
            } => {
                self.engine.add_traveler_to_trip(
                    &TripId::from(trip_id.as_str()),
                    &TravelerId::from(traveler_id.as_str()),
                )?;
                writeln!(
                    self.io.out(),
                    "Traveler {traveler_id} added to trip {trip_id}"
                )?;
            }
            TripCommand::RemoveTraveler {
                trip_id,
                traveler_id,
            } => {
                self.engine.remove_traveler_from_trip(
                    &TripId::from(trip_id.as_str()),
                    &TravelerId::from(traveler_id.as_str()),
                )?;
                writeln!(
                    self.io.out(),
                    "Traveler {traveler_id} removed from trip {trip_id}"
                )?;
            }
        }
        Ok(())
    }

    fn traveler(&mut self, command: TravelerCommand) -> Result<()> {
        match command {
            TravelerCommand::List => render::travelers(self.io.out(), self.engine.travelers())?,
            TravelerCommand::Create => {
                writeln!(self.io.out(), "\n=== Create New Traveler ===")?;
                let traveler = NewTraveler {
                    name: self.io.required("Full Name: ")?,
                    address: self.io.required("Address: ")?,
                    dob: self.io.date("Date of Birth", "dob")?,
                    emergency_contact: self.io.required("Emergency Contact: ")?,
                    gov_id_type: self.io.required("Government ID Type: ")?,
                    gov_id_number: self.io.required("Government ID Number: ")?,
                };
                let name = traveler.name.clone();

                let id = self.engine.new_traveler(traveler);
                writeln!(
                    self.io.out(),
                    "Traveler '{name}' created successfully with ID: {id}"
                )?;
            }
            TravelerCommand::Update { id } => {
                let traveler = self.engine.traveler(&TravelerId::from(id))?.clone();
                writeln!(self.io.out(), "Updating Traveler: {}", traveler.name)?;
                let patch = TravelerPatch {
                    name: self.io.optional("Full Name", &traveler.name)?,
                    address: self.io.optional("Address", &traveler.address)?,
                    dob: self.io.optional_date("Date of Birth", traveler.dob)?,
                    emergency_contact: self
                        .io
                        .optional("Emergency Contact", &traveler.emergency_contact)?,
                    gov_id_type: self
                        .io
                        .optional("Government ID Type", &traveler.gov_id_type)?,
                    gov_id_number: self
                        .io
                        .optional("Government ID Number", &traveler.gov_id_number)?,
                };

                let outcome = self.engine.update_traveler(&traveler.id, patch)?;
                render::rejections(self.io.out(), &outcome.rejected)?;
                writeln!(
                    self.io.out(),
                    "Traveler '{}' updated successfully",
                    outcome.record.name
                )?;
            }
            TravelerCommand::Delete { id } => {
                let traveler = self.engine.delete_traveler(&TravelerId::from(id))?;
                writeln!(
                    self.io.out(),
                    "Traveler '{}' deleted successfully",
                    traveler.name
                )?;
            }
        }
        Ok(())
    }

    fn leg(&mut self, command: LegCommand) -> Result<()> {
        match command {
            LegCommand::List => {
                render::legs(self.io.out(), "All Trip Legs", self.engine.trip_legs())?
            }
            LegCommand::Create => {
                writeln!(self.io.out(), "\n=== Create New Trip Leg ===")?;
                let trip_id = TripId::from(self.io.required("Trip ID: ")?.trim());
                if self.engine.trip(&trip_id).is_err() {
                    writeln!(self.io.out(), "Trip with ID {trip_id} not found.")?;
                    return Ok(());
                }
                let leg_type_prompt = format!("Leg Type ({}): ", KNOWN_LEG_TYPES.join("/"));
                let leg = NewTripLeg {
                    trip_id,
                    start_location: self.io.required("Start Location: ")?,
                    destination: self.io.required("Destination: ")?,
                    transport_provider: self.io.required("Transport Provider: ")?,
                    transport_mode: self.io.required("Transport Mode: ")?,
                    leg_type: self.io.required(&leg_type_prompt)?,
                    cost: self.io.parsed("Cost: ", "Please enter a valid number.", |raw| {
                        parse_cost("cost", raw)
                    })?,
                };

                let id = self.engine.new_trip_leg(leg)?;
                writeln!(
                    self.io.out(),
                    "Trip leg created successfully with ID: {id}"
                )?;
            }
            LegCommand::Update { id } => {
                let leg = self.engine.trip_leg(&TripLegId::from(id))?.clone();
                writeln!(
                    self.io.out(),
                    "Updating Trip Leg: {} -> {}",
                    leg.start_location,
                    leg.destination
                )?;
                let patch = TripLegPatch {
                    start_location: self.io.optional("Start Location", &leg.start_location)?,
                    destination: self.io.optional("Destination", &leg.destination)?,
                    transport_provider: self
                        .io
                        .optional("Transport Provider", &leg.transport_provider)?,
                    transport_mode: self.io.optional("Transport Mode", &leg.transport_mode)?,
                    leg_type: self.io.optional("Leg Type", &leg.leg_type)?,
                    cost: self.io.optional("Cost", &leg.cost.to_string())?,
                };

                let outcome = self.engine.update_trip_leg(&leg.id, patch)?;
                render::rejections(self.io.out(), &outcome.rejected)?;
                writeln!(self.io.out(), "Trip leg {} updated successfully", leg.id)?;
            }
            LegCommand::Delete { id } => {
                let leg = self.engine.delete_trip_leg(&TripLegId::from(id))?;
                writeln!(self.io.out(), "Trip leg {} deleted successfully", leg.id)?;
            }
        }
        Ok(())
    }

    fn user(&mut self, command: UserCommand) -> Result<()> {
        match command {
            UserCommand::List => render::users(self.io.out(), self.engine.users())?,
            UserCommand::Create => {
                writeln!(self.io.out(), "\n=== Create New User ===")?;
                let role = self.io.role()?;
                let username = self.io.required("Username: ")?;
                let password = self.io.password("Password: ")?;

                let id = self.engine.new_user(NewUser {
                    role,
                    username: username.clone(),
                    password,
                });
                writeln!(
                    self.io.out(),
                    "User '{username}' created successfully with ID: {id}"
                )?;
            }
            UserCommand::Update { id } => {
                let user = self.engine.user(&UserId::from(id))?.clone();
                writeln!(self.io.out(), "Updating User: {}", user.username)?;
                let patch = UserPatch {
                    username: self.io.optional("Username", &user.username)?,
                    password: self.io.optional_password("Password")?,
                    role: self.io.optional("Role", user.role.as_str())?,
                };

                let outcome = self.engine.update_user(&user.id, patch)?;
                render::rejections(self.io.out(), &outcome.rejected)?;
                writeln!(
                    self.io.out(),
                    "User '{}' updated successfully",
                    outcome.record.username
                )?;
            }
            UserCommand::Delete { id } => {
                let user = self.engine.delete_user(&UserId::from(id))?;
                writeln!(
                    self.io.out(),
                    "User '{}' deleted successfully",
                    user.username
                )?;
            }
        }
        Ok(())
    }

    fn report(&mut self, command: ReportCommand) -> Result<()> {
        match command {
            ReportCommand::Financial { json } => {
                let report = self.engine.financial_report();
                if json {
                    let payload = serde_json::to_string_pretty(&report)?;
                    writeln!(self.io.out(), "{payload}")?;
                } else {
                    render::financial(self.io.out(), &report)?;
                }
            }
            ReportCommand::Transport => render::transport_modes(
                self.io.out(),
                &self.engine.transport_mode_frequency(),
            )?,
            ReportCommand::LegTypes => {
                render::leg_types(self.io.out(), &self.engine.leg_type_breakdown())?
            }
            ReportCommand::Export { file } => {
                let report = self.engine.financial_report();
                if report.is_empty() {
                    writeln!(self.io.out(), "No trips found.")?;
                    return Ok(());
                }
                match export::write_financial(&report, &self.export_dir, &file) {
                    Ok(path) => writeln!(
                        self.io.out(),
                        "Financial report exported to {}",
                        path.display()
                    )?,
                    Err(err) => {
                        tracing::error!("failed to export financial report: {err}");
                        writeln!(self.io.out(), "Export failed: {err}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
