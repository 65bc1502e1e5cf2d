//! Tech card extraction.
//!
//! Turns a decoded tech-card sheet into a [`TechCard`]. Missing sheets, headers
//! or material rows never fail; they produce a card with no materials.

use mebel_models::{Grid, TechCard, TechCardMaterialLine, DEFAULT_PRODUCT_NAME};

use super::locator::{ColumnMap, ColumnRole, TableLocator};
use crate::numeric::parse_cell_number;

const REQUIRED_ROLES: &[ColumnRole] = &[ColumnRole::Name, ColumnRole::Quantity];
const OPTIONAL_ROLES: &[ColumnRole] = &[
    ColumnRole::Article,
    ColumnRole::Note,
    ColumnRole::Coefficient,
    ColumnRole::Unit,
];

/// Order-size labels are checked before product labels: "Количество изделий"
/// mentions the product too.
const ORDER_QUANTITY_KEYWORDS: &[&str] = &[
    "кол-во изд",
    "количество изд",
    "в заказе",
    "тираж",
    "партия",
    "order qty",
    "items in order",
];
const PRODUCT_KEYWORDS: &[&str] = &["издел", "продукт", "товар", "product"];

#[derive(Debug, Default)]
struct CardMeta {
    product_name: Option<String>,
    items_in_order: Option<u32>,
}

/// Tech card extractor
#[derive(Debug, Clone)]
pub struct TechCardExtractor {
    locator: TableLocator,
    meta_scan_rows: usize,
    default_product_name: String,
}

impl Default for TechCardExtractor {
    fn default() -> Self {
        Self {
            locator: TableLocator::default(),
            meta_scan_rows: 15,
            default_product_name: DEFAULT_PRODUCT_NAME.to_string(),
        }
    }
}

impl TechCardExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure how many leading rows are searched for product details
    pub fn with_meta_scan_rows(mut self, rows: usize) -> Self {
        self.meta_scan_rows = rows;
        self
    }

    pub fn with_default_product_name(mut self, name: impl Into<String>) -> Self {
        self.default_product_name = name.into();
        self
    }

    pub fn with_locator(mut self, locator: TableLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Extracts a tech card from an optional sheet; `None` stands for a workbook
    /// without the expected sheet.
    pub fn extract_sheet(&self, grid: Option<&Grid>) -> TechCard {
        match grid {
            Some(grid) => self.extract(grid),
            None => {
                tracing::debug!("Tech card sheet missing, returning empty card");
                self.empty_card()
            }
        }
    }

    pub fn extract(&self, grid: &Grid) -> TechCard {
        let (meta, table_start) = self.scan_meta(grid);
        let header = self
            .locator
            .locate(grid, table_start..grid.row_count(), REQUIRED_ROLES, OPTIONAL_ROLES);

        let items_in_order = meta.items_in_order.unwrap_or(1);
        let mut card = TechCard::new(
            meta.product_name
                .unwrap_or_else(|| self.default_product_name.clone()),
            items_in_order,
        );

        let Some(header) = header else {
            tracing::debug!(rows = grid.row_count(), "No tech card header row found");
            return card;
        };

        card.materials = self.extract_lines(grid, header.row + 1, &header.columns, card.items_in_order);
        tracing::debug!(
            header_row = header.row,
            materials = card.materials.len(),
            items_in_order = card.items_in_order,
            "Tech card extracted"
        );
        card
    }

    fn empty_card(&self) -> TechCard {
        TechCard::new(self.default_product_name.clone(), 1)
    }

    /// Reads product details from the leading rows and returns them with the
    /// first row the header search may start from. Rows that carried a detail
    /// are never header candidates; the scan stops at the first other row that
    /// already looks like the table header.
    fn scan_meta(&self, grid: &Grid) -> (CardMeta, usize) {
        let mut meta = CardMeta::default();
        let mut table_start = 0;

        for row in 0..self.meta_scan_rows.min(grid.row_count()) {
            if self.read_meta_row(grid, row, &mut meta) {
                table_start = row + 1;
                continue;
            }
            let is_header = self
                .locator
                .locate(grid, row..row + 1, REQUIRED_ROLES, OPTIONAL_ROLES)
                .is_some();
            if is_header {
                break;
            }
        }

        (meta, table_start)
    }

    /// True when the row held at least one label/value detail.
    fn read_meta_row(&self, grid: &Grid, row: usize, meta: &mut CardMeta) -> bool {
        let mut found = false;

        for (column, cell) in grid.row(row).iter().enumerate() {
            let label = cell.normalized();
            if label.is_empty() {
                continue;
            }

            let is_order_size = contains_any(&label, ORDER_QUANTITY_KEYWORDS);
            if !is_order_size && !contains_any(&label, PRODUCT_KEYWORDS) {
                continue;
            }
            // "Наименование товара | Кол-во" is a header, not a detail
            let Some(value) = value_after(grid, row, column)
                .filter(|value| self.locator.classify_header(value).is_none())
            else {
                continue;
            };

            found = true;
            if is_order_size {
                if meta.items_in_order.is_none() {
                    meta.items_in_order = Some(items_from(crate::numeric::parse_locale_number(&value)));
                }
            } else if meta.product_name.is_none() {
                meta.product_name = Some(value);
            }
        }

        found
    }

    fn extract_lines(
        &self,
        grid: &Grid,
        start_row: usize,
        columns: &ColumnMap,
        items_in_order: u32,
    ) -> Vec<TechCardMaterialLine> {
        let Some(name_col) = columns.get(ColumnRole::Name) else {
            return Vec::new();
        };
        let optional_text = |row: usize, role: ColumnRole| -> Option<String> {
            columns
                .get(role)
                .map(|col| grid.text(row, col))
                .filter(|text| !text.is_empty())
        };

        let mut lines = Vec::new();
        let mut row = start_row;
        while row < grid.row_count() {
            let name = grid.text(row, name_col);
            if name.is_empty() {
                // A single blank row separates groups; two in a row end the table
                if grid.text(row + 1, name_col).is_empty() {
                    break;
                }
                row += 1;
                continue;
            }

            let base_qty = columns
                .get(ColumnRole::Quantity)
                .and_then(|col| parse_cell_number(grid.cell(row, col)))
                .unwrap_or(0.0)
                .max(0.0);
            let coefficient = columns
                .get(ColumnRole::Coefficient)
                .and_then(|col| parse_cell_number(grid.cell(row, col)))
                .unwrap_or(1.0)
                .max(0.0);

            lines.push(
                TechCardMaterialLine::new(name, base_qty, coefficient, items_in_order)
                    .with_article(optional_text(row, ColumnRole::Article))
                    .with_unit(optional_text(row, ColumnRole::Unit))
                    .with_note(optional_text(row, ColumnRole::Note)),
            );
            row += 1;
        }

        lines
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Value paired with a label: the next non-empty cell to the right, or the text
/// after a colon inside the label cell itself ("Изделие: Шкаф").
fn value_after(grid: &Grid, row: usize, column: usize) -> Option<String> {
    let right = grid.row(row)[column + 1..]
        .iter()
        .map(|cell| cell.as_text())
        .find(|text| !text.is_empty());
    right.or_else(|| {
        grid.text(row, column)
            .split_once(':')
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn items_from(parsed: Option<f64>) -> u32 {
    match parsed {
        Some(n) if n >= 1.0 => n.round().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mebel_models::CellValue;

    fn text_grid(rows: Vec<Vec<&str>>) -> Grid {
        Grid::from_rows(rows)
    }

    #[test]
    fn test_oak_plank_scenario() {
        let grid = text_grid(vec![
            vec!["Изделие:", "Стеллаж"],
            vec!["Количество изделий в заказе", "3"],
            vec![],
            vec!["Артикул", "Наименование", "Кол-во", "Ед."],
            vec!["A1", "Oak plank", "2,5", "м2"],
        ]);

        let card = TechCardExtractor::new().extract(&grid);

        assert_eq!(card.product_name, "Стеллаж");
        assert_eq!(card.items_in_order, 3);
        assert_eq!(card.materials.len(), 1);
        let line = &card.materials[0];
        assert_eq!(line.article.as_deref(), Some("A1"));
        assert_eq!(line.name, "Oak plank");
        assert_eq!(line.unit.as_deref(), Some("м2"));
        assert_eq!(line.base_qty, 2.5);
        assert_eq!(line.coefficient, 1.0);
        assert!((line.quantity - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_blank_row_is_tolerated_and_double_blank_ends_table() {
        let grid = text_grid(vec![
            vec!["Наименование", "Количество", "Коэффициент"],
            vec!["ЛДСП 16мм", "1,2", "1,1"],
            vec!["", ""],
            vec!["Кромка", "8", ""],
            vec![],
            vec![],
            vec!["Итого по листу", "999"],
        ]);

        let card = TechCardExtractor::new().extract(&grid);

        let names: Vec<_> = card.materials.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["ЛДСП 16мм", "Кромка"]);
        assert!((card.materials[0].quantity - 1.32).abs() < 1e-9);
        assert_eq!(card.materials[1].coefficient, 1.0);
        assert_eq!(card.materials[1].quantity, 8.0);
    }

    #[test]
    fn test_unparseable_and_negative_quantities_clamp() {
        let grid = Grid::new(vec![
            vec!["Материал".into(), "Расход".into(), "Коэф.".into()],
            vec!["Петля".into(), CellValue::Text("нет".into()), CellValue::Number(2.0)],
            vec!["Ручка".into(), CellValue::Number(-3.0), CellValue::Number(-1.0)],
        ]);

        let card = TechCardExtractor::new().extract(&grid);

        assert_eq!(card.materials.len(), 2);
        assert_eq!(card.materials[0].base_qty, 0.0);
        assert_eq!(card.materials[0].quantity, 0.0);
        assert_eq!(card.materials[1].base_qty, 0.0);
        assert_eq!(card.materials[1].coefficient, 0.0);
    }

    #[test]
    fn test_order_size_rounds_and_clamps() {
        for (value, expected) in [("2,6", 3), ("0", 1), ("-4", 1), ("много", 1)] {
            let grid = text_grid(vec![
                vec!["Тираж", value],
                vec!["Наименование", "Кол-во"],
                vec!["Фанера", "1"],
            ]);
            let card = TechCardExtractor::new().extract(&grid);
            assert_eq!(card.items_in_order, expected, "order size from {value:?}");
            assert_eq!(card.materials[0].quantity, f64::from(expected));
        }
    }

    #[test]
    fn test_label_with_inline_value() {
        let grid = text_grid(vec![
            vec!["Изделие: Комод К-3"],
            vec!["Наименование", "Кол-во"],
        ]);
        let card = TechCardExtractor::new().extract(&grid);
        assert_eq!(card.product_name, "Комод К-3");
        assert!(card.materials.is_empty());
    }

    #[test]
    fn test_soft_empty_results() {
        let extractor = TechCardExtractor::new().with_default_product_name("Изделие");

        let missing = extractor.extract_sheet(None);
        assert_eq!(missing.product_name, "Изделие");
        assert!(missing.materials.is_empty());

        let no_header = extractor.extract(&text_grid(vec![vec!["просто текст"], vec!["и ещё"]]));
        assert!(no_header.materials.is_empty());
        assert_eq!(no_header.items_in_order, 1);

        let header_only = extractor.extract(&text_grid(vec![vec!["Наименование", "Кол-во"]]));
        assert!(header_only.materials.is_empty());
    }

    #[test]
    fn test_material_rows_are_not_read_as_details() {
        let grid = text_grid(vec![
            vec!["Наименование", "Кол-во"],
            vec!["Товарный знак (наклейка)", "1"],
        ]);
        let card = TechCardExtractor::new().extract(&grid);
        assert_eq!(card.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(card.materials.len(), 1);
    }

    #[test]
    fn test_details_row_naming_both_header_roles() {
        let grid = text_grid(vec![
            vec!["Наименование изделия:", "Шкаф", "Количество изделий:", "3"],
            vec![""],
            vec!["Наименование", "Кол-во", "Ед."],
            vec!["ЛДСП 16мм", "2", "м2"],
        ]);

        let card = TechCardExtractor::new().extract(&grid);

        assert_eq!(card.product_name, "Шкаф");
        assert_eq!(card.items_in_order, 3);
        assert_eq!(card.materials.len(), 1);
        assert_eq!(card.materials[0].name, "ЛДСП 16мм");
        assert_eq!(card.materials[0].quantity, 6.0);
    }

    #[test]
    fn test_header_with_product_keyword_is_not_a_detail() {
        let grid = text_grid(vec![
            vec!["Наименование товара", "Кол-во"],
            vec!["Фанера 10мм", "4"],
        ]);

        let card = TechCardExtractor::new().extract(&grid);

        assert_eq!(card.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(card.materials.len(), 1);
        assert_eq!(card.materials[0].quantity, 4.0);
    }
}
