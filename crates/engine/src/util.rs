//! Field parsing and partial-update helpers.
//!
//! Create operations take already-typed values; callers use the `parse_*`
//! functions to turn raw text into them. Update operations take raw text and
//! apply each field on its own: a field that fails to parse is reported as a
//! [`FieldRejection`] and left unchanged, the others still apply.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::Serialize;

/// Date format accepted and rendered by the store (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A field skipped during an update, with the reason it was refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRejection {
    pub field: &'static str,
    pub reason: String,
}

impl FieldRejection {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Result of an update: the record as stored afterwards plus the skipped fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome<T> {
    pub record: T,
    pub rejected: Vec<FieldRejection>,
}

impl<T> UpdateOutcome<T> {
    /// `true` when every supplied field was applied.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse a `DD/MM/YYYY` calendar date.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, FieldRejection> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FieldRejection::new(field, format!("\"{raw}\" is not a DD/MM/YYYY date")))
}

/// Parse a strictly positive number of days.
pub fn parse_duration(field: &'static str, raw: &str) -> Result<NonZeroU32, FieldRejection> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| FieldRejection::new(field, format!("\"{raw}\" is not a positive number")))
}

/// Largest cost a single leg may carry.
pub const MAX_COST: u64 = 1_000_000_000_000;

/// Parse a non-negative whole cost, at most [`MAX_COST`].
pub fn parse_cost(field: &'static str, raw: &str) -> Result<u64, FieldRejection> {
    let cost = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| FieldRejection::new(field, format!("\"{raw}\" is not a valid amount")))?;
    if cost > MAX_COST {
        return Err(FieldRejection::new(
            field,
            format!("{cost} is above the maximum of {MAX_COST}"),
        ));
    }
    Ok(cost)
}

/// Collects the rejections of a single update.
#[derive(Debug, Default)]
pub(crate) struct Patcher {
    rejected: Vec<FieldRejection>,
}

impl Patcher {
    /// Replace `slot` with `value` when present. Text fields never fail.
    pub fn text(&mut self, slot: &mut String, value: Option<String>) {
        if let Some(value) = value {
            *slot = value;
        }
    }

    /// Parse `raw` when present and store it, or record why it was skipped.
    pub fn parsed<T>(
        &mut self,
        slot: &mut T,
        raw: Option<String>,
        parse: impl FnOnce(&str) -> Result<T, FieldRejection>,
    ) {
        let Some(raw) = raw else {
            return;
        };
        match parse(&raw) {
            Ok(value) => *slot = value,
            Err(rejection) => {
                tracing::debug!("field {} left unchanged: {}", rejection.field, rejection.reason);
                self.rejected.push(rejection);
            }
        }
    }

    pub fn finish(self) -> Vec<FieldRejection> {
        self.rejected
    }
}
