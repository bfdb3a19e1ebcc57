use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;

use crate::auth::Claims;
use crate::extract::{Json, Path, Query};
use crate::models::report::CreateReportRequest;
use crate::models::shoutout::CreateShoutoutRequest;
use crate::models::{Report, ShoutoutFilter, ShoutoutResponse};
use crate::{AppError, AppState, Result};

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub department: Option<String>,
    pub sender_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub query: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

// Validation constants
const MIN_LIMIT: usize = 1;
const MAX_LIMIT: usize = 100;
const MAX_OFFSET: usize = 10000;

impl FeedParams {
    fn filter(&self) -> ShoutoutFilter {
        ShoutoutFilter {
            department: self.department.clone().filter(|d| !d.trim().is_empty()),
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            query: self.query.clone().filter(|q| !q.trim().is_empty()),
        }
    }
}

pub async fn list_shoutouts(
    State(app_state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<ResponseJson<Vec<ShoutoutResponse>>> {
    if params.limit < MIN_LIMIT || params.limit > MAX_LIMIT {
        return Err(AppError::ValidationError(format!(
            "Invalid limit. Must be between {} and {}",
            MIN_LIMIT, MAX_LIMIT
        )));
    }
    if params.offset > MAX_OFFSET {
        return Err(AppError::ValidationError(format!(
            "Invalid offset. Must be <= {}",
            MAX_OFFSET
        )));
    }

    let feed = app_state
        .shoutout_service
        .list_shoutouts(&params.filter(), params.limit, params.offset)
        .await?;
    Ok(ResponseJson(feed))
}

pub async fn create_shoutout(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateShoutoutRequest>,
) -> Result<(StatusCode, ResponseJson<ShoutoutResponse>)> {
    let shoutout = app_state.shoutout_service.create_shoutout(request, &claims).await?;
    Ok((StatusCode::CREATED, ResponseJson(shoutout)))
}

pub async fn get_shoutout(
    State(app_state): State<AppState>,
    Path(shoutout_id): Path<i64>,
) -> Result<ResponseJson<ShoutoutResponse>> {
    let shoutout = app_state.shoutout_service.get_shoutout(shoutout_id).await?;
    Ok(ResponseJson(shoutout))
}

pub async fn report_shoutout(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(shoutout_id): Path<i64>,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, ResponseJson<Report>)> {
    let report = app_state
        .moderation_service
        .report_shoutout(shoutout_id, request, &claims)
        .await?;
    Ok((StatusCode::CREATED, ResponseJson(report)))
}
