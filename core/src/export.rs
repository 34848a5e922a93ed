//! CSV export of breakdowns and batch reports. UTF-8, header row first.
//!
//! Amounts are rounded to cents here and only here.

use crate::{
    batch::BatchReport,
    breakdown::CostBreakdown,
    error::{AbsenceError, AbsenceResult},
    types::Amount,
};
use csv::Writer;

pub const COMPONENT_HEADER: &str = "Component";
pub const AMOUNT_HEADER: &str = "Amount ($)";
pub const NAME_HEADER: &str = "Employee Name";
pub const BATCH_FILE_NAME: &str = "absence_cost_batch.csv";

pub fn format_amount(amount: Amount) -> String {
    format!("{amount:.2}")
}

/// Two-column (component, amount) table for one breakdown.
pub fn export_breakdown(breakdown: &CostBreakdown) -> AbsenceResult<String> {
    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record([COMPONENT_HEADER, AMOUNT_HEADER])?;
    for (component, amount) in breakdown.iter() {
        wtr.write_record([component.to_string(), format_amount(amount)])?;
    }
    finish(wtr)
}

/// Wide table: one row per employee, one column per component.
///
/// Columns are the union of all components in first-seen order, so a
/// batch mixing base and advanced rows leaves the advanced cells of the
/// base rows empty.
pub fn export_batch(report: &BatchReport) -> AbsenceResult<String> {
    let mut columns: Vec<&str> = Vec::new();
    for row in &report.rows {
        for name in row.breakdown.component_names() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }

    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(std::iter::once(NAME_HEADER).chain(columns.iter().copied()))?;

    for row in &report.rows {
        let cells = columns.iter().map(|c| {
            row.breakdown
                .get(c)
                .map(format_amount)
                .unwrap_or_default()
        });
        wtr.write_record(std::iter::once(row.name.clone()).chain(cells))?;
    }
    finish(wtr)
}

/// `absence_cost_<name>.csv` with spaces replaced by underscores.
pub fn breakdown_file_name(profile_name: &str) -> String {
    format!("absence_cost_{}.csv", profile_name.replace(' ', "_"))
}

fn finish(wtr: Writer<Vec<u8>>) -> AbsenceResult<String> {
    let data = wtr.into_inner().map_err(|e| AbsenceError::Export {
        reason: format!("CSV writer error: {e}"),
    })?;
    String::from_utf8(data).map_err(|e| AbsenceError::Export {
        reason: format!("UTF-8 conversion error: {e}"),
    })
}
