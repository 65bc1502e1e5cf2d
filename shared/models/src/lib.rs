//! # Mebel Core Domain Models
//!
//! Plain data records produced and consumed by the costing core of the furniture
//! workshop back office.
//!
//! ## Key Models
//!
//! - **Grid**: decoded spreadsheet cells handed over by a workbook decoder
//! - **TechCard**: bill of materials for one product, scaled by the order size
//! - **MaterialCatalogRow**: one accepted line of a material price list
//! - **PaintRecipe** / **PaintJobSpec**: inputs of the paint-job cost formula
//! - **CurrencyRate** / **ForexCacheEntry**: normalized and cached currency quotes
//!
//! None of these types perform I/O; they are created per call and returned by value.

pub mod grid;
pub mod tech_card;
pub mod catalog;
pub mod paint;
pub mod forex;

#[cfg(test)]
pub mod property_tests;

pub use grid::*;
pub use tech_card::*;
pub use catalog::*;
pub use paint::*;
pub use forex::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tech_card_defaults() {
        let card = TechCard::empty();
        assert_eq!(card.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(card.items_in_order, 1);
        assert!(card.is_empty());
    }

    #[test]
    fn test_items_in_order_never_zero() {
        let card = TechCard::new("Стол", 0);
        assert_eq!(card.items_in_order, 1);
        assert_eq!(card.with_items_in_order(0).items_in_order, 1);
    }

    #[test]
    fn test_grid_json_accepts_mixed_cells() {
        let grid: Grid = serde_json::from_str(
            r#"{"cells": [["Артикул", null, 2.5]], "range": {"start_row": 3, "start_col": 1, "end_row": 3, "end_col": 3}}"#,
        )
        .unwrap();
        assert_eq!(grid.cell(0, 0), &CellValue::Text("Артикул".into()));
        assert_eq!(grid.cell(0, 1), &CellValue::Empty);
        assert_eq!(grid.cell(0, 2), &CellValue::Number(2.5));
        assert_eq!(grid.range.start_row, 3);
    }
}
