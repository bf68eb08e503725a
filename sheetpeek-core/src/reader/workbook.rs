//! Workbook data structures

use std::collections::HashMap;
use std::path::PathBuf;

/// Represents a complete workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    /// Sheets in document order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// File name used in report banners, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Cells keyed by 0-based (row, col)
    pub cells: HashMap<(u32, u32), Cell>,
    /// 1-based (max_row, max_column); (0, 0) for an empty sheet
    pub extent: (u32, u32),
    /// Error message if the formulas of this sheet could not be read
    pub formula_parsing_error: Option<String>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Insert a cell, growing the extent to cover it
    pub fn insert(&mut self, row: u32, col: u32, value: CellValue) {
        self.extent.0 = self.extent.0.max(row + 1);
        self.extent.1 = self.extent.1.max(col + 1);
        self.cells.insert((row, col), Cell { row, col, value });
    }

    pub fn max_row(&self) -> u32 {
        self.extent.0
    }

    pub fn max_column(&self) -> u32 {
        self.extent.1
    }

    /// Get a cell at the given 0-based position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }
}

/// Represents a single cell
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}

/// Cell value types, as stored in the file
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    /// Excel serial date with its rendering, if it maps to a calendar date
    DateTime {
        serial: f64,
        text: Option<String>,
    },
    /// Elapsed time in seconds
    Duration(i64),
    Error(String),
    /// Formula text without the leading `=`
    Formula(String),
}
