use axum::{
    extract::{Extension, State},
    response::Json as ResponseJson,
};

use crate::auth::Claims;
use crate::extract::{Json, Path};
use crate::models::reaction::ToggleReactionRequest;
use crate::models::Reaction;
use crate::{AppState, Result};

/// Adds the caller's reaction, or removes it if it is already there.
pub async fn toggle_reaction(
    State(app_state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(shoutout_id): Path<i64>,
    Json(request): Json<ToggleReactionRequest>,
) -> Result<ResponseJson<Vec<Reaction>>> {
    let reactions = app_state
        .reaction_service
        .toggle_reaction(shoutout_id, claims.user_id, request.reaction_type)
        .await?;
    Ok(ResponseJson(reactions))
}

pub async fn get_reactions(
    State(app_state): State<AppState>,
    Path(shoutout_id): Path<i64>,
) -> Result<ResponseJson<Vec<Reaction>>> {
    let reactions = app_state.reaction_service.get_reactions(shoutout_id).await?;
    Ok(ResponseJson(reactions))
}
