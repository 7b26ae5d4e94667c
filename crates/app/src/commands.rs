//! Console commands.
//!
//! One command per line, parsed with clap. Only ids are passed as arguments;
//! record fields are asked for interactively.

use clap::{Parser, Subcommand};
use engine::Role;

#[derive(Parser, Debug)]
#[command(
    name = "waypoint",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Manage trips and their travelers.
    #[command(subcommand)]
    Trip(TripCommand),
    /// Manage traveler profiles.
    #[command(subcommand)]
    Traveler(TravelerCommand),
    /// Manage trip legs.
    #[command(subcommand)]
    Leg(LegCommand),
    /// Manage user accounts.
    #[command(subcommand)]
    User(UserCommand),
    /// Financial and statistical reports.
    #[command(subcommand)]
    Report(ReportCommand),
    /// Show the logged in user.
    Whoami,
    /// End the session and log in again.
    Logout,
    /// Leave the program.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TripCommand {
    List,
    Create,
    /// Show a trip with its travelers, legs and cost.
    Show { id: String },
    Update { id: String },
    Delete { id: String },
    /// List the legs of a trip.
    Legs { id: String },
    AddTraveler { trip_id: String, traveler_id: String },
    RemoveTraveler { trip_id: String, traveler_id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TravelerCommand {
    List,
    Create,
    Update { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum LegCommand {
    List,
    Create,
    Update { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum UserCommand {
    List,
    Create,
    Update { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ReportCommand {
    /// Cost of every trip and the total revenue.
    Financial {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// How many legs use each transport mode.
    Transport,
    /// Leg count and cost per leg type.
    LegTypes,
    /// Write the financial report to a CSV file.
    Export {
        /// File name inside the export directory.
        #[arg(long, default_value = "financial_report.csv")]
        file: String,
    },
}

impl Command {
    /// Lowest role allowed to run the command. `None` for session commands.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Command::Trip(_) | Command::Traveler(_) | Command::Leg(_) => Some(Role::Coordinator),
            Command::Report(_) => Some(Role::Manager),
            Command::User(_) => Some(Role::Administrator),
            Command::Whoami | Command::Logout | Command::Quit => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Splits a line into words. Single or double quotes group words together.
pub fn split_line(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
