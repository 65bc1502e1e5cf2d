//! Workbook decoding
//!
//! Turns uploaded XLSX, XLS or CSV bytes into a [`Grid`] for the extractors. The
//! extractors themselves never see files.

use anyhow::{Context, Result};
use calamine::{open_workbook_from_rs, DataType, Range, Reader, Xls, Xlsx};
use mebel_models::{CellValue, Grid, UsedRange};
use std::io::Cursor;
use std::path::Path;

use crate::error::MebelError;

/// Supported workbook formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xls,
    Csv,
}

impl WorkbookFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "text/csv" | "application/csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xlsx => "XLSX",
            Self::Xls => "XLS",
            Self::Csv => "CSV",
        }
    }
}

/// Decodes one sheet of a workbook.
///
/// `sheet` selects a sheet by name (case-insensitive); `None` picks the first one.
/// Returns `Ok(None)` when the requested sheet does not exist.
pub fn decode_workbook(
    filename: &str,
    data: &[u8],
    format: Option<WorkbookFormat>,
    sheet: Option<&str>,
) -> Result<Option<Grid>> {
    let format = format
        .or_else(|| WorkbookFormat::from_extension(Path::new(filename)))
        .ok_or_else(|| MebelError::unsupported_format(filename))?;

    let grid = match format {
        WorkbookFormat::Xlsx => decode_excel::<Xlsx<Cursor<&[u8]>>>(data, sheet)?,
        WorkbookFormat::Xls => decode_excel::<Xls<Cursor<&[u8]>>>(data, sheet)?,
        WorkbookFormat::Csv => Some(decode_csv(data)?),
    };

    tracing::debug!(
        filename,
        format = format.as_str(),
        rows = grid.as_ref().map_or(0, Grid::row_count),
        "Workbook decoded"
    );
    Ok(grid)
}

fn decode_excel<'a, R>(data: &'a [u8], sheet: Option<&str>) -> Result<Option<Grid>>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    let mut workbook: R =
        open_workbook_from_rs(Cursor::new(data)).context("Failed to open Excel workbook")?;

    let names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|name| name.trim().to_lowercase() == wanted.trim().to_lowercase())
            .cloned(),
        None => names.first().cloned(),
    };
    let Some(sheet_name) = sheet_name else {
        return Ok(None);
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .context("Worksheet disappeared while reading")?
        .context("Failed to read worksheet")?;

    Ok(Some(grid_from_range(&range)))
}

fn grid_from_range(range: &Range<DataType>) -> Grid {
    let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return Grid::default();
    };

    let cells = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Grid::new(cells).with_range(UsedRange {
        start_row,
        start_col,
        end_row,
        end_col,
    })
}

fn cell_from_data(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(n) => CellValue::Number(*n as f64),
        DataType::Float(n) => CellValue::Number(*n),
        DataType::String(s) if s.trim().is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Error(_) => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

/// Decodes CSV exported by office suites; semicolon-separated files are detected
/// from the first line.
fn decode_csv(data: &[u8]) -> Result<Grid> {
    let first_line = data.split(|b| *b == b'\n').next().unwrap_or_default();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    let delimiter = if semicolons > commas { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let mut cells = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Row {}: CSV parse error", idx + 1))?;
        cells.push(record.iter().map(|field| CellValue::from(field.trim())).collect());
    }

    Ok(Grid::new(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(WorkbookFormat::from_extension(Path::new("прайс.xlsx")), Some(WorkbookFormat::Xlsx));
        assert_eq!(WorkbookFormat::from_extension(Path::new("card.XLS")), Some(WorkbookFormat::Xls));
        assert_eq!(WorkbookFormat::from_extension(Path::new("price.csv")), Some(WorkbookFormat::Csv));
        assert_eq!(WorkbookFormat::from_extension(Path::new("notes.txt")), None);
        assert_eq!(WorkbookFormat::from_content_type("text/csv"), Some(WorkbookFormat::Csv));
    }

    #[test]
    fn test_semicolon_csv() {
        let data = "Наименование;Ед.;Цена\nЛДСП 16мм;лист;4 350,00\n".as_bytes();
        let grid = decode_workbook("price.csv", data, None, None).unwrap().unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.text(1, 2), "4 350,00");
    }

    #[test]
    fn test_comma_csv_with_quoted_decimal() {
        let data = b"name,unit,price\nScrew M4,pcs,\"12,50\"\n";
        let grid = decode_workbook("price.csv", data, None, None).unwrap().unwrap();
        assert_eq!(grid.text(1, 2), "12,50");
        assert_eq!(grid.cell(1, 3), &CellValue::Empty);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let error = decode_workbook("price.pdf", b"%PDF", None, None).unwrap_err();
        let error = error.downcast_ref::<MebelError>().unwrap();
        assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_corrupt_xlsx_is_an_error() {
        assert!(decode_workbook("card.xlsx", b"not a zip", None, None).is_err());
    }

    #[test]
    fn test_calamine_cells_map_to_grid_values() {
        assert_eq!(cell_from_data(&DataType::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_from_data(&DataType::String("  ".into())), CellValue::Empty);
        assert_eq!(cell_from_data(&DataType::Bool(true)), CellValue::Text("true".into()));
    }
}
