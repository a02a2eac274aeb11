use super::SourceParam;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Create the scan history router
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(scan_history))
        .route("/today", get(scan_history_today))
}

/// Resolve a scanned barcode, recording the scan unconditionally.
///
/// Returns `{"exact": {...}}` for an exact barcode match, otherwise
/// `{"similar": [...]}` for up to five products sharing the scanned code's
/// 6-character prefix; 404 when neither exists (the scan is still recorded).
#[utoipa::path(
    get,
    path = "/api/products/barcode/{barcode}",
    params(("barcode" = String, Path, description = "Scanned barcode"), SourceParam),
    responses(
        (status = 200, description = "Exact or similar products", body = crate::services::scans::BarcodeResolution),
        (status = 404, description = "No exact or similar match", body = crate::errors::ErrorResponse)
    ),
    tag = "scans"
)]
pub async fn lookup_by_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Query(params): Query<SourceParam>,
) -> Result<impl IntoResponse, ServiceError> {
    let resolution = state
        .services
        .scans
        .resolve(&barcode, params.source.as_deref())
        .await?;
    Ok(Json(resolution))
}

/// All scans, newest first, enriched with live product lookups
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Scan history", body = [crate::services::reports::ScanRecord])
    ),
    tag = "scans"
)]
pub async fn scan_history(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let records = state.services.reports.list_scan_history().await?;
    Ok(Json(records))
}

/// Scans from the current (server-local) calendar date, newest first
#[utoipa::path(
    get,
    path = "/api/history/today",
    responses(
        (status = 200, description = "Today's scans", body = [crate::services::reports::ScanRecord])
    ),
    tag = "scans"
)]
pub async fn scan_history_today(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let records = state.services.reports.list_scans_today().await?;
    Ok(Json(records))
}
