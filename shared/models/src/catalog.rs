//! Material price-list models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit written when a price-list row leaves the unit column blank.
pub const DEFAULT_UNIT: &str = "шт";

/// One accepted row of a material price list.
///
/// Rows produced by the import pipeline always carry a non-empty `name` and a
/// strictly positive `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCatalogRow {
    pub name: String,
    pub unit: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl MaterialCatalogRow {
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && self.price.is_finite() && self.price > 0.0
    }
}

/// Material taxonomy used by the catalog screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    SheetMaterials,
    EdgeBanding,
    Hardware,
    Lighting,
    Adhesives,
    Finishing,
    Mirrors,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 8] = [
        Self::SheetMaterials,
        Self::EdgeBanding,
        Self::Hardware,
        Self::Lighting,
        Self::Adhesives,
        Self::Finishing,
        Self::Mirrors,
        Self::Other,
    ];

    /// Display label stored in the catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SheetMaterials => "Листовые материалы",
            Self::EdgeBanding => "Кромка",
            Self::Hardware => "Фурнитура",
            Self::Lighting => "Электрика и освещение",
            Self::Adhesives => "Клеи",
            Self::Finishing => "ЛКМ",
            Self::Mirrors => "Зеркала и стекло",
            Self::Other => "Прочее",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in MaterialCategory::ALL {
            assert_eq!(MaterialCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(MaterialCategory::from_label("unknown"), None);
    }

    #[test]
    fn test_well_formed_rows() {
        let row = MaterialCatalogRow {
            name: "Саморез 4x16".to_string(),
            unit: DEFAULT_UNIT.to_string(),
            price: 1.5,
            category: None,
            article: None,
        };
        assert!(row.is_well_formed());
        assert!(!MaterialCatalogRow { price: 0.0, ..row.clone() }.is_well_formed());
        assert!(!MaterialCatalogRow { name: " ".into(), ..row }.is_well_formed());
    }
}
