//! Plain text and JSON rendering of inspection reports

use std::io::{self, Write};

use super::{FileReport, RowPreview, SheetReport, WorkbookReport};
use crate::display::LINE_BREAK_MARKER;

const BANNER_WIDTH: usize = 80;

/// Write one file's section of the text report
pub fn write_file_report<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    match report {
        FileReport::NotFound { path } => writeln!(out, "File not found: {}", path.display()),
        FileReport::Inspected(workbook) => write_workbook(out, workbook),
    }
}

pub fn write_workbook<W: Write>(out: &mut W, report: &WorkbookReport) -> io::Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out)?;
    writeln!(out, "{}", banner)?;
    writeln!(out, "Analyzing: {}", report.file_name)?;
    writeln!(out, "{}", banner)?;
    writeln!(out)?;

    for sheet in &report.sheets {
        write_sheet(out, sheet)?;
    }
    Ok(())
}

pub fn write_sheet<W: Write>(out: &mut W, sheet: &SheetReport) -> io::Result<()> {
    writeln!(out, "[Sheet: {}]", sheet.name)?;
    writeln!(
        out,
        "  Max Row: {}, Max Column: {}",
        sheet.max_row, sheet.max_column
    )?;
    if let Some(err) = &sheet.formula_error {
        writeln!(out, "  Formulas unavailable: {}", err)?;
    }
    writeln!(out)?;

    if sheet.max_row >= 1 {
        writeln!(out, "  Headers:")?;
        for row in &sheet.headers {
            write_row(out, row, true)?;
        }
    }

    if let Some(samples) = &sheet.samples {
        writeln!(out, "  Sample Data:")?;
        for row in samples {
            write_row(out, row, false)?;
        }
    }

    writeln!(out)
}

/// Header rows flag line breaks; sample rows print `(empty)` when blank
fn write_row<W: Write>(out: &mut W, row: &RowPreview, is_header: bool) -> io::Result<()> {
    writeln!(out, "    Row {}:", row.row)?;
    for cell in &row.cells {
        let marker = if is_header && cell.line_break {
            LINE_BREAK_MARKER
        } else {
            ""
        };
        writeln!(out, "      [{}] = {}{}", cell.column, cell.text, marker)?;
    }
    if !is_header && row.cells.is_empty() {
        writeln!(out, "      (empty)")?;
    }
    writeln!(out)
}

/// Write all reports as a pretty JSON array
pub fn write_json<W: Write>(out: &mut W, reports: &[FileReport]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)
}
