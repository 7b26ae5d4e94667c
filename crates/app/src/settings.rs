//! Handles settings for the application.
//!
//! Sources, lowest precedence first: the TOML file (`config/waypoint.toml`
//! unless `--config` says otherwise, optional), `WAYPOINT__*` environment
//! variables, then command line flags.
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/waypoint.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Console {
    pub prompt: String,
    /// Hide typed passwords when stdin is a terminal.
    pub mask_passwords: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            prompt: "waypoint> ".to_string(),
            mask_passwords: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Reports {
    pub export_dir: String,
}

impl Default for Reports {
    fn default() -> Self {
        Self {
            export_dir: "reports".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub admin_password: String,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            admin_password: engine::DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub console: Console,
    pub reports: Reports,
    pub seed: Seed,
}

#[derive(Debug, Parser)]
#[command(name = "waypoint", about = "Console travel management")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level (e.g. debug, info, warn).
    #[arg(long)]
    log_level: Option<String>,
    /// Override the directory report exports are written to.
    #[arg(long)]
    export_dir: Option<String>,
    /// Read passwords as plain lines even on a terminal.
    #[arg(long)]
    no_mask: bool,
}

pub fn load() -> Result<Settings> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings = from_sources(config_path)?;

    if let Some(level) = args.log_level {
        settings.app.level = level;
    }
    if let Some(export_dir) = args.export_dir {
        settings.reports.export_dir = export_dir;
    }
    if args.no_mask {
        settings.console.mask_passwords = false;
    }

    Ok(settings)
}

fn from_sources(config_path: &str) -> Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("WAYPOINT").separator("__"))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
