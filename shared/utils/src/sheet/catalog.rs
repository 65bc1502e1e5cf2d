//! Material price-list extraction.
//!
//! Price lists come either with a recognizable header in the first few rows or as
//! a bare table in a known column order. Rows without a name or a positive price
//! are dropped; only the kept/dropped counts are reported.

use mebel_models::{Grid, MaterialCatalogRow, DEFAULT_UNIT};
use serde::Serialize;

use super::classifier::classify_material;
use super::locator::{ColumnMap, ColumnRole, TableLocator};
use crate::numeric::parse_cell_number;

const REQUIRED_ROLES: &[ColumnRole] = &[ColumnRole::Name, ColumnRole::Price];
const OPTIONAL_ROLES: &[ColumnRole] = &[ColumnRole::Unit, ColumnRole::Category, ColumnRole::Article];

/// Column positions assumed when no header row is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackColumns {
    pub name: usize,
    pub price: usize,
    pub unit: Option<usize>,
    pub category: Option<usize>,
    pub article: Option<usize>,
}

impl Default for FallbackColumns {
    /// Name, unit, price, category.
    fn default() -> Self {
        Self {
            name: 0,
            unit: Some(1),
            price: 2,
            category: Some(3),
            article: None,
        }
    }
}

impl FallbackColumns {
    fn to_column_map(self) -> ColumnMap {
        let mut columns = ColumnMap::default();
        columns.assign(ColumnRole::Name, self.name);
        columns.assign(ColumnRole::Price, self.price);
        if let Some(unit) = self.unit {
            columns.assign(ColumnRole::Unit, unit);
        }
        if let Some(category) = self.category {
            columns.assign(ColumnRole::Category, category);
        }
        if let Some(article) = self.article {
            columns.assign(ColumnRole::Article, article);
        }
        columns
    }
}

/// Price-list extraction result with aggregate statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExtraction {
    pub rows: Vec<MaterialCatalogRow>,
    pub header_row: Option<usize>,
    pub used_fallback: bool,
    /// Rows examined before the table ended, blank separators included.
    pub scanned_rows: usize,
    pub dropped_rows: usize,
}

/// Material price-list extractor
#[derive(Debug, Clone)]
pub struct MaterialCatalogExtractor {
    locator: TableLocator,
    header_window: usize,
    default_unit: String,
    fallback: FallbackColumns,
}

impl Default for MaterialCatalogExtractor {
    fn default() -> Self {
        Self {
            locator: TableLocator::default(),
            header_window: 6,
            default_unit: DEFAULT_UNIT.to_string(),
            fallback: FallbackColumns::default(),
        }
    }
}

impl MaterialCatalogExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure how many leading rows are searched for a header
    pub fn with_header_window(mut self, rows: usize) -> Self {
        self.header_window = rows;
        self
    }

    pub fn with_default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = unit.into();
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackColumns) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_locator(mut self, locator: TableLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn extract(&self, grid: &Grid) -> Vec<MaterialCatalogRow> {
        self.extract_with_stats(grid).rows
    }

    pub fn extract_with_stats(&self, grid: &Grid) -> CatalogExtraction {
        let header = self
            .locator
            .locate(grid, 0..self.header_window, REQUIRED_ROLES, OPTIONAL_ROLES);

        let (columns, start_row, header_row) = match header {
            Some(header) => (header.columns, header.row + 1, Some(header.row)),
            None => {
                tracing::debug!(
                    window = self.header_window,
                    "No price-list header found, using positional columns"
                );
                (self.fallback.to_column_map(), 0, None)
            }
        };

        let (rows, scanned_rows) = self.extract_rows(grid, start_row, &columns);
        let dropped_rows = scanned_rows - rows.len();

        tracing::debug!(
            kept = rows.len(),
            dropped = dropped_rows,
            header_row = ?header_row,
            "Price list extracted"
        );

        CatalogExtraction {
            rows,
            header_row,
            used_fallback: header_row.is_none(),
            scanned_rows,
            dropped_rows,
        }
    }

    fn extract_rows(
        &self,
        grid: &Grid,
        start_row: usize,
        columns: &ColumnMap,
    ) -> (Vec<MaterialCatalogRow>, usize) {
        let (Some(name_col), Some(price_col)) =
            (columns.get(ColumnRole::Name), columns.get(ColumnRole::Price))
        else {
            return (Vec::new(), 0);
        };
        let is_blank = |row: usize| grid.cell(row, name_col).is_empty() && grid.cell(row, price_col).is_empty();
        let optional_text = |row: usize, role: ColumnRole| -> Option<String> {
            columns
                .get(role)
                .map(|col| grid.text(row, col))
                .filter(|text| !text.is_empty())
        };

        let mut rows = Vec::new();
        let mut scanned = 0;
        for row in start_row..grid.row_count() {
            if is_blank(row) && is_blank(row + 1) {
                break;
            }
            scanned += 1;

            let name = grid.text(row, name_col);
            let price = parse_cell_number(grid.cell(row, price_col));
            let price = match price {
                Some(price) if price > 0.0 && !name.is_empty() => price,
                _ => continue,
            };

            let category = optional_text(row, ColumnRole::Category)
                .unwrap_or_else(|| classify_material(&name).label().to_string());

            rows.push(MaterialCatalogRow {
                unit: optional_text(row, ColumnRole::Unit).unwrap_or_else(|| self.default_unit.clone()),
                price,
                category: Some(category),
                article: optional_text(row, ColumnRole::Article),
                name,
            });
        }

        (rows, scanned)
    }
}
