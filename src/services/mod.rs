pub mod user_service;
pub mod shoutout_service;
pub mod comment_service;
pub mod reaction_service;
pub mod moderation_service;
pub mod stats_service;

// Re-export services for convenience
pub use user_service::UserService;
pub use shoutout_service::ShoutoutService;
pub use comment_service::CommentService;
pub use reaction_service::ReactionService;
pub use moderation_service::ModerationService;
pub use stats_service::StatsService;

use std::collections::HashMap;

use crate::db::repository::UserRepository;
use crate::models::UserResponse;
use crate::Result;

/// Public user views keyed by id, loaded once per request for hydrating responses.
pub(crate) async fn user_directory(
    user_repo: &dyn UserRepository,
) -> Result<HashMap<i64, UserResponse>> {
    let users = user_repo.list_users().await?;
    Ok(users.into_iter().map(|u| (u.id, UserResponse::from(u))).collect())
}
