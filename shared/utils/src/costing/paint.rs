//! Paint job costing.

use mebel_models::{PaintJobSpec, PaintRecipe};
use serde::{Deserialize, Serialize};

const MM2_PER_M2: f64 = 1_000_000.0;

/// Everything that went into a paint job price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintCostBreakdown {
    pub area_m2: f64,
    pub price_per_area: f64,
    pub total: i64,
}

/// Outer surface of a box in square metres, dimensions given in millimetres.
pub fn surface_area_m2(width_mm: f64, height_mm: f64, depth_mm: f64) -> f64 {
    if !(width_mm > 0.0 && height_mm > 0.0 && depth_mm > 0.0) {
        return 0.0;
    }
    let area_mm2 = 2.0 * (width_mm * height_mm + width_mm * depth_mm + height_mm * depth_mm);
    let area = area_mm2 / MM2_PER_M2;
    if area.is_finite() {
        area
    } else {
        0.0
    }
}

/// Price of one square metre of one layer.
pub fn effective_price_per_area(recipe: &PaintRecipe) -> f64 {
    let positive = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);

    if let Some(price) = positive(recipe.price_per_area) {
        return price;
    }
    match (positive(recipe.cost_per_mass), positive(recipe.consumption_per_area)) {
        (Some(cost), Some(consumption)) => cost * consumption,
        _ => 0.0,
    }
}

pub fn paint_cost(recipe: &PaintRecipe, job: &PaintJobSpec) -> PaintCostBreakdown {
    let area_m2 = surface_area_m2(job.width_mm, job.height_mm, job.depth_mm);
    let price_per_area = effective_price_per_area(recipe);

    PaintCostBreakdown {
        area_m2,
        price_per_area,
        total: paint_total(price_per_area, area_m2, job),
    }
}

fn paint_total(price_per_area: f64, area_m2: f64, job: &PaintJobSpec) -> i64 {
    let complexity = job.complexity_coeff;
    if !(price_per_area > 0.0 && complexity > 0.0 && area_m2 > 0.0) || job.layers == 0 {
        return 0;
    }

    let loss = if job.loss_percent.is_finite() { job.loss_percent.max(0.0) } else { 0.0 };
    let total = price_per_area * complexity * (1.0 + loss / 100.0) * area_m2 * f64::from(job.layers);

    if total.is_finite() {
        total.round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(width_mm: f64, height_mm: f64, depth_mm: f64, layers: u32) -> PaintJobSpec {
        PaintJobSpec {
            width_mm,
            height_mm,
            depth_mm,
            layers,
            loss_percent: 5.0,
            complexity_coeff: 1.15,
        }
    }

    #[test]
    fn test_cabinet_facade_job() {
        let result = paint_cost(&PaintRecipe::per_area(1200.0), &job(600.0, 800.0, 150.0, 2));

        let area = 2.0 * (0.6 * 0.8 + 0.6 * 0.15 + 0.8 * 0.15);
        assert!((result.area_m2 - area).abs() < 1e-9);
        assert_eq!(result.price_per_area, 1200.0);
        assert_eq!(result.total, (1200.0 * 1.15 * 1.05 * area * 2.0_f64).round() as i64);
        assert_eq!(result.total, 3999);
    }

    #[test]
    fn test_area_requires_all_dimensions() {
        assert_eq!(surface_area_m2(600.0, 0.0, 150.0), 0.0);
        assert_eq!(surface_area_m2(-600.0, 800.0, 150.0), 0.0);
        assert_eq!(surface_area_m2(f64::NAN, 800.0, 150.0), 0.0);
        assert!((surface_area_m2(1000.0, 1000.0, 1000.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_price_from_mass_consumption() {
        assert_eq!(effective_price_per_area(&PaintRecipe::per_mass(900.0, 0.2)), 180.0);
        assert_eq!(effective_price_per_area(&PaintRecipe::per_mass(900.0, 0.0)), 0.0);
        assert_eq!(effective_price_per_area(&PaintRecipe::default()), 0.0);

        let mixed = PaintRecipe {
            price_per_area: Some(0.0),
            ..PaintRecipe::per_mass(900.0, 0.2)
        };
        assert_eq!(effective_price_per_area(&mixed), 180.0);
    }

    #[test]
    fn test_any_zero_factor_zeroes_the_total() {
        let recipe = PaintRecipe::per_area(1200.0);
        assert_eq!(paint_cost(&recipe, &job(600.0, 800.0, 150.0, 0)).total, 0);
        assert_eq!(paint_cost(&recipe, &job(0.0, 800.0, 150.0, 2)).total, 0);
        assert_eq!(paint_cost(&PaintRecipe::default(), &job(600.0, 800.0, 150.0, 2)).total, 0);

        let flat = PaintJobSpec {
            complexity_coeff: 0.0,
            ..job(600.0, 800.0, 150.0, 2)
        };
        let result = paint_cost(&recipe, &flat);
        assert_eq!(result.total, 0);
        assert!(result.area_m2 > 0.0);
    }
}
