use axum::{extract::State, response::Json};
use mebel_utils::RULE_TABLE_VERSION;
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let import = &state.config.import;

    Json(json!({
        "status": "healthy",
        "service": "mebel-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "import": {
            "rule_table_version": RULE_TABLE_VERSION,
            "meta_scan_rows": import.meta_scan_rows,
            "catalog_header_window": import.catalog_header_window,
            "allowed_extensions": import.allowed_extensions,
        }
    }))
}
