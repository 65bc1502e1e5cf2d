//! Cost derivation from extracted records.

pub mod aggregate;
pub mod paint;

pub use aggregate::{aggregate_cost, cost_lines, price_map_from_catalog, CostLine};
pub use paint::{effective_price_per_area, paint_cost, surface_area_m2, PaintCostBreakdown};
