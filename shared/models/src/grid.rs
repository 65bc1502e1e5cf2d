//! Spreadsheet grid models.
//!
//! A `Grid` is what a workbook decoder hands to the import pipeline: a 2-D block
//! of cell values plus the used range it was cut from. Row and column indices on
//! the grid are always relative to the top-left corner of the used range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Trimmed display text, with integral numbers printed without a fraction.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
        }
    }

    /// Trimmed, lowercased text used for keyword matching.
    pub fn normalized(&self) -> String {
        self.as_text().to_lowercase()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Used cell range of the source sheet, zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UsedRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl UsedRange {
    pub fn height(&self) -> usize {
        (self.end_row.saturating_sub(self.start_row) + 1) as usize
    }

    pub fn width(&self) -> usize {
        (self.end_col.saturating_sub(self.start_col) + 1) as usize
    }
}

/// Decoded sheet contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Grid {
    pub cells: Vec<Vec<CellValue>>,
    pub range: UsedRange,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl Grid {
    pub fn new(cells: Vec<Vec<CellValue>>) -> Self {
        let height = cells.len() as u32;
        let width = cells.iter().map(Vec::len).max().unwrap_or(0) as u32;
        Self {
            cells,
            range: UsedRange {
                start_row: 0,
                start_col: 0,
                end_row: height.saturating_sub(1),
                end_col: width.saturating_sub(1),
            },
        }
    }

    /// Convenience constructor for text-only grids, mostly used by tests and CSV input.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn with_range(mut self, range: UsedRange) -> Self {
        self.range = range;
        self
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        self.cells.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).as_text()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(CellValue::is_empty))
    }
}
