//! Spreadsheet Import Module
//!
//! Header discovery and record extraction for tech cards and material price
//! lists, plus decoding of uploaded workbooks into grids.

pub mod locator;
pub mod classifier;
pub mod tech_card;
pub mod catalog;
pub mod workbook;

pub use locator::{ColumnMap, ColumnRole, HeaderMatch, RoleRule, TableLocator, RULE_TABLE_VERSION};
pub use classifier::classify_material;
pub use tech_card::TechCardExtractor;
pub use catalog::{CatalogExtraction, FallbackColumns, MaterialCatalogExtractor};
pub use workbook::{decode_workbook, WorkbookFormat};
