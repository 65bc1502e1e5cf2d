//! Cost Calculation Handlers

use axum::{extract::State, response::Json};
use mebel_models::{PaintJobSpec, PaintRecipe, TechCard};
use mebel_utils::{aggregate_cost, cost_lines, paint_cost, validate_model, CostLine, PaintCostBreakdown};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{middleware::ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCostRequest {
    #[serde(default)]
    pub lines: Vec<CostLine>,
    /// Materials of an imported tech card, priced from `price_map`.
    #[serde(default)]
    pub tech_card: Option<TechCard>,
    #[serde(default)]
    pub price_map: HashMap<String, f64>,
    #[serde(default)]
    pub labor_cost: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCostResponse {
    pub total: i64,
    pub line_count: usize,
}

/// POST /api/v1/costing/materials
pub async fn calculate_material_cost(
    State(state): State<AppState>,
    Json(request): Json<MaterialCostRequest>,
) -> Json<MaterialCostResponse> {
    let mut lines = request.lines;
    if let Some(card) = &request.tech_card {
        lines.extend(cost_lines(card));
    }

    let total = aggregate_cost(&lines, &request.price_map, request.labor_cost);
    state.metrics.record_costing("materials");

    Json(MaterialCostResponse {
        total,
        line_count: lines.len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PaintCostRequest {
    pub recipe: PaintRecipe,
    pub job: PaintJobSpec,
}

#[derive(Debug, Serialize)]
pub struct PaintCostResponse {
    #[serde(flatten)]
    pub breakdown: PaintCostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
}

/// POST /api/v1/costing/paint
pub async fn calculate_paint_cost(
    State(state): State<AppState>,
    Json(request): Json<PaintCostRequest>,
) -> Result<Json<PaintCostResponse>, ApiError> {
    validate_model(&request.job)?;

    let breakdown = paint_cost(&request.recipe, &request.job);
    state.metrics.record_costing("paint");

    Ok(Json(PaintCostResponse {
        breakdown,
        ratio: request.recipe.ratio.map(|ratio| ratio.describe()),
    }))
}
