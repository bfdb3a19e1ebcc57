use std::sync::Arc;

use crate::auth::Claims;
use crate::db::repository::{CommentRepository, ShoutoutRepository, UserRepository};
use crate::models::comment::{CreateCommentRequest, NewComment};
use crate::models::validation::{required_text, MAX_COMMENT_LEN};
use crate::models::CommentResponse;
use crate::services::user_directory;
use crate::{AppError, Result};

pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    shoutout_repo: Arc<dyn ShoutoutRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        shoutout_repo: Arc<dyn ShoutoutRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comment_repo,
            shoutout_repo,
            user_repo,
        }
    }

    async fn ensure_shoutout_exists(&self, shoutout_id: i64) -> Result<()> {
        match self.shoutout_repo.get_shoutout_by_id(shoutout_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Shoutout {} not found", shoutout_id))),
        }
    }

    pub async fn create_comment(
        &self,
        shoutout_id: i64,
        request: CreateCommentRequest,
        author: &Claims,
    ) -> Result<CommentResponse> {
        let content = required_text("content", &request.content, MAX_COMMENT_LEN)?;
        self.ensure_shoutout_exists(shoutout_id).await?;

        let user = self
            .user_repo
            .get_user_by_id(author.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        let comment = self
            .comment_repo
            .create_comment(&NewComment {
                shoutout_id,
                user_id: author.user_id,
                content,
            })
            .await?;

        tracing::info!("💬 Comment {} added to shoutout {} by user {}", comment.id, shoutout_id, user.id);
        Ok(CommentResponse::new(comment, user.into()))
    }

    /// Comments on a shoutout, oldest first.
    pub async fn get_comments_for_shoutout(&self, shoutout_id: i64) -> Result<Vec<CommentResponse>> {
        self.ensure_shoutout_exists(shoutout_id).await?;

        let comments = self.comment_repo.get_comments_by_shoutout_id(shoutout_id).await?;
        let users = user_directory(self.user_repo.as_ref()).await?;

        comments
            .into_iter()
            .map(|comment| {
                let user = users.get(&comment.user_id).cloned().ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Author {} of comment {} is missing",
                        comment.user_id, comment.id
                    ))
                })?;
                Ok(CommentResponse::new(comment, user))
            })
            .collect()
    }
}
