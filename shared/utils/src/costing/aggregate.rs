//! Material cost roll-up.

use mebel_models::{MaterialCatalogRow, TechCard, TechCardMaterialLine};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One priced (or to-be-priced) material line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub name: String,
    pub quantity: f64,
    /// Explicit unit price; falls back to the price map when absent or not positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CostLine {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    fn unit_price(&self, price_map: &HashMap<String, f64>) -> f64 {
        match self.price {
            Some(price) if price.is_finite() && price > 0.0 => price,
            _ => price_map
                .get(&self.name)
                .copied()
                .filter(|price| price.is_finite())
                .unwrap_or(0.0),
        }
    }
}

impl From<&TechCardMaterialLine> for CostLine {
    fn from(line: &TechCardMaterialLine) -> Self {
        Self::new(line.name.clone(), line.quantity)
    }
}

/// Cost lines for every material of a tech card, priced later from a price map.
pub fn cost_lines(card: &TechCard) -> Vec<CostLine> {
    card.materials.iter().map(CostLine::from).collect()
}

/// Name → price lookup built from an imported price list. Later rows win.
pub fn price_map_from_catalog(rows: &[MaterialCatalogRow]) -> HashMap<String, f64> {
    rows.iter().map(|row| (row.name.clone(), row.price)).collect()
}

/// Sums `unit price × quantity` over all lines with a positive quantity, adds the
/// labor cost (negative labor counts as zero) and rounds once at the end.
pub fn aggregate_cost(lines: &[CostLine], price_map: &HashMap<String, f64>, labor_cost: f64) -> i64 {
    let materials: f64 = lines
        .iter()
        .filter(|line| line.quantity > 0.0)
        .map(|line| line.unit_price(price_map) * line.quantity)
        .sum();

    let labor = if labor_cost.is_finite() { labor_cost.max(0.0) } else { 0.0 };
    let total = materials + labor;

    if total.is_finite() {
        total.round() as i64
    } else {
        0
    }
}
