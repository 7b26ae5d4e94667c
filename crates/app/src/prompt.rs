//! Line-oriented prompting.
//!
//! Every prompt re-asks until it gets a usable value, except the optional
//! ones used by updates, where a blank line means "keep the current value".

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{DATE_FORMAT, FieldRejection, Role};

use crate::error::{AppError, Result};

/// How passwords are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordMode {
    /// Raw terminal mode, echoing `*` on stderr.
    Masked,
    /// A plain line from the input, like any other prompt.
    Plain,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    password_mode: PasswordMode,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, password_mode: PasswordMode) -> Self {
        Self {
            input,
            output,
            password_mode,
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `prompt` and reads one line without its line ending.
    /// Fails with [`AppError::InputClosed`] at end of input.
    pub fn line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    /// A non-empty value.
    pub fn required(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            if !value.trim().is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "This field cannot be empty. Please try again.")?;
        }
    }

    /// `None` on a blank line, which update operations read as "leave as is".
    pub fn optional(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        let value = self.line(&format!("{label} [{current}]: "))?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Like [`Prompter::optional`] for a date, showing the current one as `DD/MM/YYYY`.
    pub fn optional_date(&mut self, label: &str, current: NaiveDate) -> Result<Option<String>> {
        let value = self.line(&format!(
            "{label} [{}] (DD/MM/YYYY): ",
            current.format(DATE_FORMAT)
        ))?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Re-asks until `parse` accepts the value.
    pub fn parsed<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        parse: impl Fn(&str) -> std::result::Result<T, FieldRejection>,
    ) -> Result<T> {
        loop {
            let value = self.line(prompt)?;
            match parse(&value) {
                Ok(parsed) => return Ok(parsed),
                Err(rejection) => {
                    tracing::debug!("rejected {}: {}", rejection.field, rejection.reason);
                    writeln!(self.output, "{retry}")?;
                }
            }
        }
    }

    pub fn date(&mut self, label: &str, field: &'static str) -> Result<NaiveDate> {
        self.parsed(
            &format!("{label} (DD/MM/YYYY): "),
            "Invalid date format. Please use DD/MM/YYYY.",
            |raw| engine::parse_date(field, raw),
        )
    }

    pub fn role(&mut self) -> Result<Role> {
        loop {
            let value = self.line("Role (coordinator/manager/administrator): ")?;
            match value.parse::<Role>() {
                Ok(role) => return Ok(role),
                Err(err) => writeln!(self.output, "{err}. Please try again.")?,
            }
        }
    }

    pub fn password(&mut self, prompt: &str) -> Result<String> {
        match self.password_mode {
            PasswordMode::Plain => self.line(prompt),
            PasswordMode::Masked => prompt_password(prompt),
        }
    }

    /// A new password for an update, read like [`Prompter::password`].
    /// `None` on a blank entry.
    pub fn optional_password(&mut self, label: &str) -> Result<Option<String>> {
        let value = self.password(&format!("{label} [unchanged]: "))?;
        Ok((!value.is_empty()).then_some(value))
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press does to a masked entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskedKey {
    Type(char),
    Erase,
    Submit,
    Cancel,
    Ignore,
}

impl From<KeyEvent> for MaskedKey {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return MaskedKey::Ignore;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => MaskedKey::Submit,
            KeyCode::Backspace => MaskedKey::Erase,
            KeyCode::Char('c') if control => MaskedKey::Cancel,
            KeyCode::Char(ch) if !control => MaskedKey::Type(ch),
            _ => MaskedKey::Ignore,
        }
    }
}

/// Reads a password in raw mode; the prompt and one `*` per character go to
/// stderr.
fn prompt_password(prompt: &str) -> Result<String> {
    let _raw = RawModeGuard::enter()?;
    let mut echo = std::io::stderr();
    execute!(
        echo,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;

    let mut typed = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match MaskedKey::from(key) {
            MaskedKey::Type(ch) => {
                typed.push(ch);
                execute!(echo, Print('*'))?;
            }
            MaskedKey::Erase => {
                if typed.pop().is_some() {
                    execute!(echo, cursor::MoveLeft(1), Print(' '), cursor::MoveLeft(1))?;
                }
            }
            MaskedKey::Submit => break,
            MaskedKey::Cancel => {
                execute!(echo, Print("\r\n"))?;
                return Err(AppError::Interrupted);
            }
            MaskedKey::Ignore => {}
        }
    }

    execute!(echo, Print("\r\n"))?;
    Ok(typed)
}
