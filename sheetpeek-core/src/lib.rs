//! sheetpeek-core: preview the structure and content of spreadsheet workbooks
//!
//! Reads Excel/ODS files with calamine and reports, per sheet, its extent, the
//! first rows as headers and the next few rows as sample data.

pub mod config;
pub mod display;
pub mod error;
pub mod generate;
pub mod reader;
pub mod report;

pub use config::{Config, GenerateConfig, PreviewConfig};
pub use error::InspectError;
pub use reader::{Cell, CellValue, Sheet, Workbook};
pub use report::{BatchSummary, FileReport, Inspector, SheetReport, WorkbookReport};
