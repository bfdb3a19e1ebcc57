use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json as ResponseJson,
};

use crate::auth::Claims;
use crate::extract::{Json, Path};
use crate::models::comment::CreateCommentRequest;
use crate::models::CommentResponse;
use crate::{AppState, Result};

pub async fn create_comment(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(shoutout_id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, ResponseJson<CommentResponse>)> {
    let comment = app_state
        .comment_service
        .create_comment(shoutout_id, request, &claims)
        .await?;
    Ok((StatusCode::CREATED, ResponseJson(comment)))
}

pub async fn get_comments(
    State(app_state): State<AppState>,
    Path(shoutout_id): Path<i64>,
) -> Result<ResponseJson<Vec<CommentResponse>>> {
    let comments = app_state.comment_service.get_comments_for_shoutout(shoutout_id).await?;
    Ok(ResponseJson(comments))
}
