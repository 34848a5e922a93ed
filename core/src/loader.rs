//! Batch loader — CSV rows and JSON profile files into raw fields.
//!
//! RULE: Only a file that cannot be read as a profile table fails the
//! load: unreadable bytes, no header row, or no recognized column.
//! A bad or missing cell just leaves that field unset, and the
//! resolver fills it with its default.

use crate::{
    error::{AbsenceError, AbsenceResult},
    profile::{AbsenceProfile, RawProfileFields},
    resolver::ParameterResolver,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path};

pub const NAME_COLUMN: &str = "employee_name";

/// Parse batch CSV text.
pub fn load_batch_str(csv_data: &str) -> AbsenceResult<Vec<RawProfileFields>> {
    load_batch_reader(csv_data.as_bytes())
}

pub fn load_batch_path(path: impl AsRef<Path>) -> AbsenceResult<Vec<RawProfileFields>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    log::debug!("loader: reading batch file {}", path.display());
    load_batch_reader(file)
}

pub fn load_batch_reader<R: Read>(rdr: R) -> AbsenceResult<Vec<RawProfileFields>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AbsenceError::MalformedBatch {
            reason: "missing header row".into(),
        });
    }
    if !headers.iter().any(|h| is_known_column(h)) {
        return Err(AbsenceError::MalformedBatch {
            reason: format!("no recognized profile column in header {headers:?}"),
        });
    }
    for unknown in headers.iter().filter(|h| !is_known_column(h)) {
        log::debug!("loader: ignoring unrecognized column '{unknown}'");
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        rows.push(row_fields(idx + 1, &headers, &record));
    }

    log::debug!("loader: parsed {} rows", rows.len());
    Ok(rows)
}

/// Load and resolve in one step.
pub fn load_profiles<R: Read>(
    resolver: &ParameterResolver,
    rdr: R,
) -> AbsenceResult<Vec<AbsenceProfile>> {
    Ok(load_batch_reader(rdr)?
        .iter()
        .map(|raw| resolver.resolve(raw))
        .collect())
}

/// Read one profile from a JSON object with batch column names as keys.
pub fn load_profile_json(path: impl AsRef<Path>) -> AbsenceResult<RawProfileFields> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn row_fields(row: usize, headers: &[String], record: &StringRecord) -> RawProfileFields {
    let mut raw = RawProfileFields::default();

    for (column, cell) in headers.iter().zip(record.iter()) {
        if cell.is_empty() {
            continue;
        }
        match column.as_str() {
            NAME_COLUMN => raw.employee_name = Some(cell.to_string()),
            "employment_type" => match cell.parse() {
                Ok(t) => raw.employment_type = Some(t),
                Err(e) => log::warn!("loader: row {row}: {e}, using default"),
            },
            "role_criticality" => match cell.parse() {
                Ok(c) => raw.role_criticality = Some(c),
                Err(e) => log::warn!("loader: row {row}: {e}, using default"),
            },
            numeric => match cell.parse::<f64>() {
                Ok(value) => {
                    raw.set_numeric(numeric, value);
                }
                Err(_) if is_known_column(numeric) => {
                    log::warn!("loader: row {row}: {numeric}='{cell}' is not a number, using default");
                }
                Err(_) => {}
            },
        }
    }

    raw
}

fn is_known_column(column: &str) -> bool {
    matches!(column, NAME_COLUMN | "employment_type" | "role_criticality")
        || RawProfileFields::default().set_numeric(column, 0.0)
}
