//! CSV export of reports.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use engine::FinancialReport;
use serde::Serialize;

use crate::error::{AppError, Result};

#[derive(Serialize)]
struct ExportRow<'a> {
    trip_id: &'a str,
    name: &'a str,
    total_cost: u64,
    travelers: usize,
    cost_per_traveler: String,
}

const HEADER: [&str; 5] = [
    "trip_id",
    "name",
    "total_cost",
    "travelers",
    "cost_per_traveler",
];

/// Serializes the report rows to CSV bytes, header included even without rows.
pub fn financial_csv(report: &FinancialReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(vec![]);
    writer.write_record(HEADER)?;
    for row in &report.trips {
        writer.serialize(ExportRow {
            trip_id: row.trip_id.as_str(),
            name: &row.name,
            total_cost: row.total_cost,
            travelers: row.travelers,
            cost_per_traveler: format!("{:.2}", row.cost_per_traveler),
        })?;
    }

    Ok(writer.into_inner().map_err(|err| err.into_error())?)
}

/// Writes the report into `dir/file`, creating `dir` if needed.
///
/// `file` must be a bare file name: anything with a directory part would
/// land outside `dir`.
pub fn write_financial(report: &FinancialReport, dir: &str, file: &str) -> Result<PathBuf> {
    if Path::new(file).file_name() != Some(OsStr::new(file)) {
        tracing::warn!("refused export file name {file:?}");
        return Err(AppError::ExportFileName(file.to_string()));
    }

    let data = financial_csv(report)?;
    fs::create_dir_all(dir)?;
    let path = Path::new(dir).join(file);
    fs::write(&path, data)?;
    tracing::info!("financial report exported to {}", path.display());
    Ok(path)
}
