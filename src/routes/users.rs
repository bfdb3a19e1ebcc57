use axum::{
    extract::{Extension, State},
    response::Json as ResponseJson,
};

use crate::auth::Claims;
use crate::extract::{Json, Path};
use crate::models::user::{UpdateUserRequest, UserResponse};
use crate::models::LeaderboardEntry;
use crate::{AppState, Result};

pub async fn get_users(State(app_state): State<AppState>) -> Result<ResponseJson<Vec<UserResponse>>> {
    let users = app_state.user_service.list_users().await?;
    Ok(ResponseJson(users))
}

pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ResponseJson<UserResponse>> {
    let user = app_state.user_service.get_user(user_id).await?;
    Ok(ResponseJson(user))
}

pub async fn update_user(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<ResponseJson<UserResponse>> {
    let user = app_state.user_service.update_user(&claims, user_id, request).await?;
    Ok(ResponseJson(user))
}

pub async fn get_leaderboard(
    State(app_state): State<AppState>,
) -> Result<ResponseJson<Vec<LeaderboardEntry>>> {
    let leaderboard = app_state.stats_service.leaderboard().await?;
    Ok(ResponseJson(leaderboard))
}
