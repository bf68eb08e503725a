//! Excel/ODS file reader using calamine

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{InspectError, Result};

pub mod workbook;

pub use workbook::{Cell, CellValue, Sheet, Workbook};

/// Read a workbook from a file path
///
/// Missing paths yield [`InspectError::MissingFile`]; anything calamine
/// cannot parse yields [`InspectError::UnreadableWorkbook`]. The file handle
/// is released before this returns.
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InspectError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let unreadable = |source| InspectError::UnreadableWorkbook {
        path: path.to_path_buf(),
        source,
    };

    let mut excel: Sheets<_> = open_workbook_auto(path).map_err(unreadable)?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = excel.worksheet_range(sheet_name).map_err(unreadable)?;

        // Formulas are read literally; a sheet whose formulas cannot be read
        // still gets its stored values.
        let (formula_range, formula_error) = match excel.worksheet_formula(sheet_name) {
            Ok(range) => (Some(range), None),
            Err(e) => {
                warn!(sheet = %sheet_name, error = %e, "could not read formulas");
                (None, Some(e.to_string()))
            }
        };

        let mut sheet = parse_sheet(sheet_name, &range, formula_range.as_ref());
        sheet.formula_parsing_error = formula_error;

        debug!(
            sheet = %sheet.name,
            max_row = sheet.max_row(),
            max_column = sheet.max_column(),
            "read sheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

fn parse_sheet(name: &str, range: &Range<Data>, formula_range: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // Ranges start at their first used cell, not at A1
    if let Some((r0, c0)) = range.start() {
        for (row, col, data) in range.used_cells() {
            if matches!(data, Data::Empty) {
                continue;
            }
            sheet.insert(
                r0 + row as u32,
                c0 + col as u32,
                parse_cell_value(data),
            );
        }
    }

    // A stored formula takes precedence over its cached value
    if let Some(formulas) = formula_range {
        if let Some((r0, c0)) = formulas.start() {
            for (row, col, formula) in formulas.used_cells() {
                if formula.is_empty() {
                    continue;
                }
                sheet.insert(
                    r0 + row as u32,
                    c0 + col as u32,
                    CellValue::Formula(formula.clone()),
                );
            }
        }
    }

    sheet
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(d) => CellValue::Duration(d.num_seconds()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTime(dt) => CellValue::DateTime {
            serial: dt.as_f64(),
            text: dt
                .as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
