//! Paint recipe and paint job models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mixing ratio of a two- or three-component paint. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintRatio {
    pub base: f64,
    pub hardener: f64,
    pub thinner: f64,
}

impl PaintRatio {
    /// Human readable ratio such as `100:50:10`.
    pub fn describe(&self) -> String {
        [self.base, self.hardener, self.thinner]
            .iter()
            .map(|part| {
                if part.fract() == 0.0 {
                    format!("{}", *part as i64)
                } else {
                    format!("{}", part)
                }
            })
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Paint system pricing.
///
/// A recipe is priced either directly per square metre or from the material
/// price per kilogram and the consumption in kilograms per square metre. When
/// both are present the direct price wins as long as it is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaintRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption_per_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<PaintRatio>,
}

impl PaintRecipe {
    pub fn per_area(price_per_area: f64) -> Self {
        Self {
            price_per_area: Some(price_per_area),
            ..Self::default()
        }
    }

    pub fn per_mass(cost_per_mass: f64, consumption_per_area: f64) -> Self {
        Self {
            cost_per_mass: Some(cost_per_mass),
            consumption_per_area: Some(consumption_per_area),
            ..Self::default()
        }
    }

    pub fn with_ratio(mut self, ratio: PaintRatio) -> Self {
        self.ratio = Some(ratio);
        self
    }
}

/// Geometry and difficulty of a single paint job. Dimensions are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaintJobSpec {
    #[validate(range(min = 0.0, message = "Width must not be negative"))]
    pub width_mm: f64,
    #[validate(range(min = 0.0, message = "Height must not be negative"))]
    pub height_mm: f64,
    #[validate(range(min = 0.0, message = "Depth must not be negative"))]
    pub depth_mm: f64,
    pub layers: u32,
    #[validate(range(min = 0.0, message = "Loss percent must not be negative"))]
    pub loss_percent: f64,
    #[validate(range(min = 0.0, message = "Complexity coefficient must not be negative"))]
    pub complexity_coeff: f64,
}
