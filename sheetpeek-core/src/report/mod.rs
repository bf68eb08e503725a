//! Inspection reports
//!
//! A report is built from a [`Workbook`] first and rendered afterwards, so the
//! window and text rules live here and the layout lives in [`render`].

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::PreviewConfig;
use crate::display::DisplayText;
use crate::error::{InspectError, Result};
use crate::reader::{self, Sheet, Workbook};

pub mod render;

/// Outcome of inspecting one input path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileReport {
    NotFound { path: PathBuf },
    Inspected(WorkbookReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookReport {
    pub path: PathBuf,
    pub file_name: String,
    pub sheets: Vec<SheetReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub name: String,
    pub max_row: u32,
    pub max_column: u32,
    /// Empty when the sheet has no rows
    pub headers: Vec<RowPreview>,
    /// `None` when the sheet ends within the header rows
    pub samples: Option<Vec<RowPreview>>,
    /// Why formulas could not be read; cells then show cached values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPreview {
    /// 1-based row number
    pub row: u32,
    /// Non-empty cells only, in column order
    pub cells: Vec<CellPreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPreview {
    /// 1-based column number
    pub column: u32,
    pub text: String,
    pub line_break: bool,
}

/// Builds reports for workbooks using a preview window
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    preview: PreviewConfig,
}

impl Inspector {
    /// Create an inspector with the default 3-row header and 4-row sample windows
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(preview: PreviewConfig) -> Self {
        Self { preview }
    }

    /// Read and inspect a single file
    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> Result<WorkbookReport> {
        let workbook = reader::read_workbook(path)?;
        Ok(self.inspect_workbook(&workbook))
    }

    /// Inspect one file and render it as report text
    pub fn inspect<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let report = match self.inspect_file(path) {
            Ok(report) => FileReport::Inspected(report),
            Err(e) if e.is_recoverable() => FileReport::NotFound {
                path: path.to_path_buf(),
            },
            Err(e) => return Err(e),
        };

        let mut out = Vec::new();
        render::write_file_report(&mut out, &report)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Inspect every path in order, collecting reports
    ///
    /// Missing files become [`FileReport::NotFound`]; the first unreadable
    /// workbook aborts the batch.
    pub fn collect_batch<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<FileReport>> {
        let mut reports = Vec::with_capacity(paths.len());
        for path in paths {
            reports.push(self.file_report(path.as_ref())?);
        }
        Ok(reports)
    }

    /// Inspect every path in order, writing each report as soon as it is built
    ///
    /// Reports already written stay written if a later workbook is unreadable.
    pub fn run_batch<P: AsRef<Path>, W: Write>(
        &self,
        paths: &[P],
        out: &mut W,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        for path in paths {
            let report = self.file_report(path.as_ref())?;
            match &report {
                FileReport::NotFound { .. } => summary.missing += 1,
                FileReport::Inspected(_) => summary.inspected += 1,
            }
            render::write_file_report(out, &report)?;
        }
        out.flush()?;
        Ok(summary)
    }

    fn file_report(&self, path: &Path) -> Result<FileReport> {
        match self.inspect_file(path) {
            Ok(report) => Ok(FileReport::Inspected(report)),
            Err(InspectError::MissingFile { path }) => {
                warn!(path = %path.display(), "file not found, skipping");
                Ok(FileReport::NotFound { path })
            }
            Err(e) => Err(e),
        }
    }

    /// Build the report for an already loaded workbook
    pub fn inspect_workbook(&self, workbook: &Workbook) -> WorkbookReport {
        WorkbookReport {
            path: workbook.path.clone(),
            file_name: workbook.file_name(),
            sheets: workbook
                .sheets
                .iter()
                .map(|sheet| self.inspect_sheet(sheet))
                .collect(),
        }
    }

    pub fn inspect_sheet(&self, sheet: &Sheet) -> SheetReport {
        let max_row = sheet.max_row();
        let header_end = self.preview.header_rows.min(max_row);

        let headers = (1..=header_end)
            .map(|row| self.preview_row(sheet, row))
            .collect();

        let first_sample = self.preview.first_sample_row();
        let has_samples = self.preview.sample_rows > 0 && max_row >= first_sample;
        let samples = has_samples.then(|| {
            let last = self.preview.last_sample_row().min(max_row);
            (first_sample..=last)
                .map(|row| self.preview_row(sheet, row))
                .collect()
        });

        debug!(sheet = %sheet.name, header_rows = header_end, "inspected sheet");

        SheetReport {
            name: sheet.name.clone(),
            max_row,
            max_column: sheet.max_column(),
            headers,
            samples,
            formula_error: sheet.formula_parsing_error.clone(),
        }
    }

    fn preview_row(&self, sheet: &Sheet, row: u32) -> RowPreview {
        let last_col = self.preview.max_columns.min(sheet.max_column());
        let cells = (1..=last_col)
            .filter_map(|column| {
                let cell = sheet.get_cell(row - 1, column - 1)?;
                let display = DisplayText::from_value(&cell.value, self.preview.max_text_chars);
                (!display.is_empty()).then(|| CellPreview {
                    column,
                    text: display.text,
                    line_break: display.line_break,
                })
            })
            .collect();

        RowPreview { row, cells }
    }
}

/// Counts from a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub inspected: usize,
    pub missing: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn grid_sheet(name: &str, rows: u32, cols: u32) -> Sheet {
        let mut sheet = Sheet::new(name);
        for r in 0..rows {
            for c in 0..cols {
                sheet.insert(r, c, text(&format!("r{}c{}", r + 1, c + 1)));
            }
        }
        sheet
    }

    #[test]
    fn test_five_by_three_windows() {
        let report = Inspector::new().inspect_sheet(&grid_sheet("Data", 5, 3));

        assert_eq!((report.max_row, report.max_column), (5, 3));
        assert_eq!(
            report.headers.iter().map(|r| r.row).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(report.headers.iter().all(|r| r.cells.len() == 3));

        let samples = report.samples.unwrap();
        assert_eq!(samples.iter().map(|r| r.row).collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(samples[1].cells[2].text, "r5c3");
        assert_eq!(samples[1].cells[2].column, 3);
    }

    #[test]
    fn test_two_rows_have_no_samples() {
        let report = Inspector::new().inspect_sheet(&grid_sheet("Short", 2, 2));
        assert_eq!(report.headers.len(), 2);
        assert!(report.samples.is_none());
    }

    #[test]
    fn test_empty_sheet_has_no_sections() {
        let report = Inspector::new().inspect_sheet(&Sheet::new("Blank"));
        assert_eq!((report.max_row, report.max_column), (0, 0));
        assert!(report.headers.is_empty());
        assert!(report.samples.is_none());
    }

    #[test]
    fn test_windows_are_capped() {
        let report = Inspector::new().inspect_sheet(&grid_sheet("Wide", 20, 15));
        assert_eq!(report.headers.len(), 3);
        assert!(report.headers.iter().all(|r| r.cells.len() == 10));

        let samples = report.samples.unwrap();
        assert_eq!(samples.first().map(|r| r.row), Some(4));
        assert_eq!(samples.last().map(|r| r.row), Some(7));
    }

    #[test]
    fn test_oversized_sample_window_is_clamped() {
        let preview = PreviewConfig {
            sample_rows: u32::MAX,
            ..Default::default()
        };
        let report = Inspector::with_config(preview).inspect_sheet(&grid_sheet("Tall", 9, 1));
        let samples = report.samples.unwrap();
        assert_eq!(samples.first().map(|r| r.row), Some(4));
        assert_eq!(samples.last().map(|r| r.row), Some(9));

        let preview = PreviewConfig {
            header_rows: u32::MAX,
            ..Default::default()
        };
        let report = Inspector::with_config(preview).inspect_sheet(&grid_sheet("Tall", 9, 1));
        assert_eq!(report.headers.len(), 9);
        assert!(report.samples.is_none());
    }

    #[test]
    fn test_zero_sample_rows_has_no_section() {
        let preview = PreviewConfig {
            sample_rows: 0,
            ..Default::default()
        };
        let report = Inspector::with_config(preview).inspect_sheet(&grid_sheet("S", 6, 2));
        assert_eq!(report.headers.len(), 3);
        assert!(report.samples.is_none());
    }

    #[test]
    fn test_formula_error_is_reported() {
        let mut sheet = grid_sheet("Calc", 1, 1);
        sheet.formula_parsing_error = Some("bad formula part".to_string());
        let report = Inspector::new().inspect_sheet(&sheet);
        assert_eq!(report.formula_error.as_deref(), Some("bad formula part"));

        let clean = Inspector::new().inspect_sheet(&grid_sheet("Calc", 1, 1));
        assert!(clean.formula_error.is_none());
        let json = serde_json::to_value(&clean).unwrap();
        assert!(json.get("formula_error").is_none());
    }

    #[test]
    fn test_blank_cells_are_skipped() {
        let mut sheet = Sheet::new("Gaps");
        sheet.insert(0, 0, text("id"));
        sheet.insert(0, 2, text("   "));
        sheet.insert(0, 3, text("name"));
        sheet.insert(4, 0, CellValue::Empty);
        sheet.insert(5, 1, CellValue::Integer(9));

        let report = Inspector::new().inspect_sheet(&sheet);
        let columns: Vec<_> = report.headers[0].cells.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![1, 4]);

        let samples = report.samples.unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples[0].cells.is_empty());
        assert!(samples[1].cells.is_empty());
        assert_eq!(samples[2].cells[0].text, "9");
    }

    #[test]
    fn test_custom_window() {
        let preview = PreviewConfig {
            header_rows: 1,
            sample_rows: 2,
            max_columns: 2,
            max_text_chars: 3,
        };
        let report = Inspector::with_config(preview).inspect_sheet(&grid_sheet("S", 6, 4));

        assert_eq!(report.headers.len(), 1);
        assert_eq!(report.headers[0].cells.len(), 2);
        assert_eq!(report.headers[0].cells[0].text, "r1c...");

        let samples = report.samples.unwrap();
        assert_eq!(samples.iter().map(|r| r.row).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_collect_batch_skips_missing() {
        let reports = Inspector::new()
            .collect_batch(&["nope/one.xlsx", "nope/two.xlsx"])
            .unwrap();
        assert_eq!(reports.len(), 2);
        assert!(matches!(&reports[0], FileReport::NotFound { path } if path == Path::new("nope/one.xlsx")));
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let report = FileReport::NotFound {
            path: PathBuf::from("x.xlsx"),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["path"], "x.xlsx");
    }
}
