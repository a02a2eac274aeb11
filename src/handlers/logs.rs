use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};

/// All product action logs (add/edit/delete), newest first
#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Action logs", body = [crate::services::reports::ActionLogRecord])
    ),
    tag = "logs"
)]
pub async fn list_action_logs(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let logs = state.services.reports.list_action_logs().await?;
    Ok(Json(logs))
}
