use std::io::{self, IsTerminal};

use console::Console;
use prompt::{PasswordMode, Prompter};

mod commands;
mod console;
mod error;
mod export;
mod prompt;
mod render;
mod settings;

fn main() -> error::Result<()> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "waypoint={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .admin_password(settings.seed.admin_password.clone())
        .build();

    let stdin = io::stdin();
    let password_mode = if settings.console.mask_passwords && stdin.is_terminal() {
        PasswordMode::Masked
    } else {
        PasswordMode::Plain
    };
    tracing::info!("starting console, passwords {password_mode:?}");

    let io = Prompter::new(stdin.lock(), io::stdout(), password_mode);
    let mut console = Console::new(engine, io, &settings);
    console.run()
}
