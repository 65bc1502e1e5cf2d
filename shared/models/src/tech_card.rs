//! Tech card (bill of materials) models.
//!
//! A tech card lists the materials needed to assemble a product, scaled by the
//! number of items in the order.

use serde::{Deserialize, Serialize};

/// Product name used when a sheet never names its product.
pub const DEFAULT_PRODUCT_NAME: &str = "Без названия";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechCard {
    pub product_name: String,
    pub items_in_order: u32,
    pub materials: Vec<TechCardMaterialLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechCardMaterialLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub base_qty: f64,
    pub coefficient: f64,
    pub quantity: f64,
}

impl TechCardMaterialLine {
    /// Builds a line and derives `quantity` from the other factors.
    ///
    /// Negative or non-finite factors are clamped to zero so the stored quantity
    /// is always `base_qty * coefficient * items_in_order`.
    pub fn new(
        name: impl Into<String>,
        base_qty: f64,
        coefficient: f64,
        items_in_order: u32,
    ) -> Self {
        let base_qty = non_negative(base_qty);
        let coefficient = non_negative(coefficient);
        Self {
            article: None,
            name: name.into(),
            unit: None,
            note: None,
            base_qty,
            coefficient,
            quantity: base_qty * coefficient * f64::from(items_in_order.max(1)),
        }
    }

    pub fn with_article(mut self, article: Option<String>) -> Self {
        self.article = article;
        self
    }

    pub fn with_unit(mut self, unit: Option<String>) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    fn rescaled(&self, items_in_order: u32) -> Self {
        Self {
            quantity: self.base_qty * self.coefficient * f64::from(items_in_order),
            ..self.clone()
        }
    }
}

impl TechCard {
    pub fn new(product_name: impl Into<String>, items_in_order: u32) -> Self {
        Self {
            product_name: product_name.into(),
            items_in_order: items_in_order.max(1),
            materials: Vec::new(),
        }
    }

    /// Empty card returned when a sheet, header or material rows are missing.
    pub fn empty() -> Self {
        Self::new(DEFAULT_PRODUCT_NAME, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Returns a copy of the card for a different order size, recomputing every
    /// line quantity.
    pub fn with_items_in_order(&self, items_in_order: u32) -> Self {
        let items_in_order = items_in_order.max(1);
        Self {
            product_name: self.product_name.clone(),
            items_in_order,
            materials: self
                .materials
                .iter()
                .map(|line| line.rescaled(items_in_order))
                .collect(),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
