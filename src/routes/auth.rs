use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::extract::Json;
use crate::models::user::{CreateUserRequest, LoginRequest, UserResponse};
use crate::{AppState, Result};

pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, ResponseJson<Value>)> {
    let (user, token) = app_state
        .user_service
        .register(request, &app_state.auth_service)
        .await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(json!({
            "user": user,
            "token": token,
            "message": "User registered successfully"
        })),
    ))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ResponseJson<Value>> {
    let (user, token) = app_state
        .user_service
        .authenticate_user(&request.email, &request.password, &app_state.auth_service)
        .await?;

    Ok(ResponseJson(json!({
        "user": user,
        "token": token,
        "message": "Login successful"
    })))
}

pub async fn me(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<UserResponse>> {
    let user = app_state.user_service.get_user(claims.user_id).await?;
    Ok(ResponseJson(user))
}
