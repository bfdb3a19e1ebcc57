use axum::{
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::extract::Path;
use crate::models::{AdminLog, AdminStats, PendingReport, Report};
use crate::{AppState, Result};

pub async fn delete_shoutout(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(shoutout_id): Path<i64>,
) -> Result<ResponseJson<Value>> {
    app_state.moderation_service.delete_shoutout(shoutout_id, &claims).await?;
    Ok(ResponseJson(json!({ "message": "Shoutout deleted" })))
}

pub async fn delete_comment(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(comment_id): Path<i64>,
) -> Result<ResponseJson<Value>> {
    app_state.moderation_service.delete_comment(comment_id, &claims).await?;
    Ok(ResponseJson(json!({ "message": "Comment deleted" })))
}

pub async fn get_pending_reports(
    State(app_state): State<AppState>,
) -> Result<ResponseJson<Vec<PendingReport>>> {
    let reports = app_state.moderation_service.pending_reports().await?;
    Ok(ResponseJson(reports))
}

pub async fn resolve_report(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(report_id): Path<i64>,
) -> Result<ResponseJson<Report>> {
    let report = app_state.moderation_service.resolve_report(report_id, &claims).await?;
    Ok(ResponseJson(report))
}

pub async fn get_stats(State(app_state): State<AppState>) -> Result<ResponseJson<AdminStats>> {
    let stats = app_state.stats_service.admin_stats().await?;
    Ok(ResponseJson(stats))
}

pub async fn get_logs(State(app_state): State<AppState>) -> Result<ResponseJson<Vec<AdminLog>>> {
    let logs = app_state.moderation_service.admin_logs().await?;
    Ok(ResponseJson(logs))
}

pub async fn export_metrics(State(app_state): State<AppState>) -> Result<impl IntoResponse> {
    let csv = app_state.stats_service.export_csv().await?;
    let filename = format!("bragboard_metrics_{}.csv", Utc::now().format("%Y-%m-%d"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        csv,
    ))
}
