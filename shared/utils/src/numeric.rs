//! Locale-tolerant number parsing for spreadsheet cells.
//!
//! Price lists and tech cards arrive with numbers typed by hand: `"1 250,50"`,
//! `"12,5 м²"`, `"₽ 300"`. Parsing keeps digits, dots and minus signs after
//! turning decimal commas into dots and dropping every kind of whitespace.

use mebel_models::CellValue;

/// Parses a cell into a finite number; `None` stands for "not a number".
pub fn parse_cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => n.is_finite().then_some(*n),
        CellValue::Text(text) => parse_locale_number(text),
        CellValue::Empty => None,
    }
}

/// Parses a localized numeric string.
pub fn parse_locale_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
