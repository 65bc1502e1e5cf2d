use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .nest("/import", import_routes())
        .nest("/costing", costing_routes())
}

fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/tech-card", post(import_tech_card))
        .route("/catalog", post(import_catalog))
}

fn costing_routes() -> Router<AppState> {
    Router::new()
        .route("/materials", post(calculate_material_cost))
        .route("/paint", post(calculate_paint_cost))
}
