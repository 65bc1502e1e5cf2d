//! Spreadsheet Import Handlers
//!
//! Accept tech cards and supplier price lists as multipart uploads and return
//! the extracted records. Nothing is persisted here.

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::Json,
};
use mebel_models::{Grid, TechCard};
use mebel_utils::{
    decode_workbook, validate_file_size, validate_file_type, CatalogExtraction, FallbackColumns,
    FallbackColumnsConfig, MaterialCatalogExtractor, MebelError, TechCardExtractor, WorkbookFormat,
    RULE_TABLE_VERSION,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{middleware::ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    /// Sheet name; the first sheet is used when absent.
    pub sheet: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechCardImportResponse {
    pub import_id: Uuid,
    pub filename: String,
    pub sheet_found: bool,
    pub rule_table_version: u32,
    pub tech_card: TechCard,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImportResponse {
    pub import_id: Uuid,
    pub filename: String,
    pub sheet_found: bool,
    pub rule_table_version: u32,
    #[serde(flatten)]
    pub extraction: CatalogExtraction,
}

struct Upload {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/v1/import/tech-card
pub async fn import_tech_card(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    mut multipart: Multipart,
) -> Result<Json<TechCardImportResponse>, ApiError> {
    let upload = read_upload(&mut multipart).await?;
    let grid = match decode_upload(&state, &upload, query.sheet.as_deref()) {
        Ok(grid) => grid,
        Err(error) => {
            state.metrics.record_import("tech_card", "error");
            return Err(error);
        }
    };

    let import = &state.config.import;
    let extractor = TechCardExtractor::new()
        .with_meta_scan_rows(import.meta_scan_rows)
        .with_default_product_name(import.default_product_name.clone());
    let card = extractor.extract_sheet(grid.as_ref());

    let outcome = if card.is_empty() { "empty" } else { "ok" };
    state.metrics.record_import("tech_card", outcome);
    tracing::info!(
        filename = %upload.filename,
        product = %card.product_name,
        materials = card.materials.len(),
        "Tech card imported"
    );

    Ok(Json(TechCardImportResponse {
        import_id: Uuid::new_v4(),
        filename: upload.filename,
        sheet_found: grid.is_some(),
        rule_table_version: RULE_TABLE_VERSION,
        tech_card: card,
    }))
}

/// POST /api/v1/import/catalog
pub async fn import_catalog(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    mut multipart: Multipart,
) -> Result<Json<CatalogImportResponse>, ApiError> {
    let upload = read_upload(&mut multipart).await?;
    let grid = match decode_upload(&state, &upload, query.sheet.as_deref()) {
        Ok(grid) => grid,
        Err(error) => {
            state.metrics.record_import("catalog", "error");
            return Err(error);
        }
    };

    let import = &state.config.import;
    let extractor = MaterialCatalogExtractor::new()
        .with_header_window(import.catalog_header_window)
        .with_default_unit(import.default_unit.clone())
        .with_fallback(fallback_columns(&import.catalog_fallback));
    let extraction = extractor.extract_with_stats(grid.as_ref().unwrap_or(&Grid::default()));

    let outcome = if extraction.rows.is_empty() { "empty" } else { "ok" };
    state.metrics.record_import("catalog", outcome);
    state
        .metrics
        .record_catalog_rows(extraction.rows.len(), extraction.dropped_rows);
    tracing::info!(
        filename = %upload.filename,
        kept = extraction.rows.len(),
        dropped = extraction.dropped_rows,
        "Price list imported"
    );

    Ok(Json(CatalogImportResponse {
        import_id: Uuid::new_v4(),
        filename: upload.filename,
        sheet_found: grid.is_some(),
        rule_table_version: RULE_TABLE_VERSION,
        extraction,
    }))
}

/// First file field of the form.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MebelError::validation("file", format!("Failed to read upload: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| MebelError::validation("file", format!("Failed to read file data: {}", e)))?;

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(MebelError::validation("file", "No file provided").into())
}

fn decode_upload(state: &AppState, upload: &Upload, sheet: Option<&str>) -> Result<Option<Grid>, ApiError> {
    let allowed: Vec<&str> = state
        .config
        .import
        .allowed_extensions
        .iter()
        .map(String::as_str)
        .collect();
    validate_file_type(&upload.filename, &allowed)?;
    validate_file_size(upload.data.len() as u64, state.config.server.max_request_size as u64)?;

    let format = upload
        .content_type
        .as_deref()
        .and_then(WorkbookFormat::from_content_type);

    decode_workbook(&upload.filename, &upload.data, format, sheet).map_err(|e| {
        let error = match e.downcast::<MebelError>() {
            Ok(error) => error,
            Err(e) => MebelError::workbook_decoding(format!("{:#}", e)),
        };
        ApiError(error)
    })
}

fn fallback_columns(config: &FallbackColumnsConfig) -> FallbackColumns {
    FallbackColumns {
        name: config.name,
        price: config.price,
        unit: config.unit,
        category: config.category,
        article: config.article,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_columns_follow_config() {
        let config = mebel_utils::ImportConfig::default();
        assert_eq!(fallback_columns(&config.catalog_fallback), FallbackColumns::default());
    }
}
