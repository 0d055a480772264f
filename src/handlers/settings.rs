use crate::api::SettingPayload;
use crate::db::filter::SettingFilter;
use crate::service::timezone::{self, PRIMARY_COMPANY_ID};
use crate::{CoreError, router::CoreState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use tracing::info;

/// GET /settings
pub async fn list_settings(
    State(state): State<CoreState>,
) -> Result<Json<Vec<SettingPayload>>, CoreError> {
    let rows = state.settings.list(&SettingFilter::new()).await?;
    Ok(Json(rows))
}

/// POST /settings -> 201 with the stored record.
pub async fn create_setting(
    State(state): State<CoreState>,
    Json(payload): Json<SettingPayload>,
) -> Result<impl IntoResponse, CoreError> {
    let id = state.settings.create(payload).await?;
    info!(company_id = id, "company settings created");
    let stored = state.settings.read_for_api(id).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /settings/{id}
pub async fn get_setting(
    State(state): State<CoreState>,
    Path(id): Path<i64>,
) -> Result<Json<SettingPayload>, CoreError> {
    Ok(Json(state.settings.read_for_api(id).await?))
}

/// PUT /settings/{id}. The path id wins over any `CompanyID` in the body.
pub async fn update_setting(
    State(state): State<CoreState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<SettingPayload>,
) -> Result<Json<SettingPayload>, CoreError> {
    payload.company_id = id;
    state.settings.update_for_api(payload).await?;
    info!(company_id = id, "company settings updated");
    Ok(Json(state.settings.read_for_api(id).await?))
}

/// DELETE /settings/{id}
pub async fn delete_setting(
    State(state): State<CoreState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, CoreError> {
    state.settings.delete(id).await?;
    info!(company_id = id, "company settings deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /clock -> current time in the primary company's time zone.
pub async fn company_clock(State(state): State<CoreState>) -> Result<Json<Value>, CoreError> {
    let now = timezone::company_now(state.settings.storage(), PRIMARY_COMPANY_ID).await?;
    Ok(Json(json!({
        "TimeZone": now.timezone().name(),
        "Now": now.to_rfc3339(),
    })))
}
