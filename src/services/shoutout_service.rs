use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::Claims;
use crate::db::repository::{
    CommentRepository, ReactionRepository, ShoutoutRepository, UserRepository,
};
use crate::models::shoutout::CreateShoutoutRequest;
use crate::models::{Shoutout, ShoutoutFilter, ShoutoutResponse, UserResponse};
use crate::services::user_directory;
use crate::{AppError, Result};

pub struct ShoutoutService {
    shoutout_repo: Arc<dyn ShoutoutRepository>,
    user_repo: Arc<dyn UserRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
}

impl ShoutoutService {
    pub fn new(
        shoutout_repo: Arc<dyn ShoutoutRepository>,
        user_repo: Arc<dyn UserRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
    ) -> Self {
        Self {
            shoutout_repo,
            user_repo,
            comment_repo,
            reaction_repo,
        }
    }

    pub async fn create_shoutout(
        &self,
        request: CreateShoutoutRequest,
        sender: &Claims,
    ) -> Result<ShoutoutResponse> {
        let new_shoutout = request.into_new_shoutout(sender.user_id)?;

        let mut unknown = Vec::new();
        for id in &new_shoutout.recipient_ids {
            if self.user_repo.get_user_by_id(*id).await?.is_none() {
                unknown.push(id.to_string());
            }
        }
        if !unknown.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Unknown recipient ids: {}",
                unknown.join(", ")
            )));
        }

        let shoutout = self.shoutout_repo.create_shoutout(&new_shoutout).await?;
        tracing::info!(
            "📣 Shoutout {} created by user {} for {} recipient(s)",
            shoutout.id,
            sender.user_id,
            shoutout.recipient_ids.len()
        );

        let users = user_directory(self.user_repo.as_ref()).await?;
        self.hydrate(shoutout, &users).await
    }

    pub async fn get_shoutout(&self, shoutout_id: i64) -> Result<ShoutoutResponse> {
        let shoutout = self
            .shoutout_repo
            .get_shoutout_by_id(shoutout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shoutout {} not found", shoutout_id)))?;

        let users = user_directory(self.user_repo.as_ref()).await?;
        self.hydrate(shoutout, &users).await
    }

    /// Feed, newest first, after filtering and paging.
    pub async fn list_shoutouts(
        &self,
        filter: &ShoutoutFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ShoutoutResponse>> {
        let shoutouts = self.shoutout_repo.list_shoutouts().await?;
        let users = user_directory(self.user_repo.as_ref()).await?;

        let mut feed = Vec::new();
        let mut skipped = 0;
        for shoutout in shoutouts {
            if feed.len() == limit {
                break;
            }
            let mut response = resolve_people(shoutout, &users)?;
            if !filter.matches(&response) {
                continue;
            }
            if skipped < offset {
                skipped += 1;
                continue;
            }
            self.attach_engagement(&mut response).await?;
            feed.push(response);
        }

        tracing::debug!("📰 Feed query returned {} shoutouts", feed.len());
        Ok(feed)
    }

    /// Resolves sender, recipients, reactions and comment count for one shoutout.
    pub async fn hydrate(
        &self,
        shoutout: Shoutout,
        users: &HashMap<i64, UserResponse>,
    ) -> Result<ShoutoutResponse> {
        let mut response = resolve_people(shoutout, users)?;
        self.attach_engagement(&mut response).await?;
        Ok(response)
    }

    async fn attach_engagement(&self, response: &mut ShoutoutResponse) -> Result<()> {
        response.reactions = self.reaction_repo.get_reactions_by_shoutout_id(response.id).await?;
        response.comments_count = self.comment_repo.count_comments_by_shoutout_id(response.id).await?;
        Ok(())
    }
}

/// Builds the response with people resolved and engagement left empty.
fn resolve_people(
    shoutout: Shoutout,
    users: &HashMap<i64, UserResponse>,
) -> Result<ShoutoutResponse> {
    let sender = users.get(&shoutout.sender_id).cloned().ok_or_else(|| {
        AppError::InternalError(format!(
            "Sender {} of shoutout {} is missing",
            shoutout.sender_id, shoutout.id
        ))
    })?;
    let recipients = shoutout
        .recipient_ids
        .iter()
        .filter_map(|id| users.get(id).cloned())
        .collect();

    Ok(ShoutoutResponse {
        id: shoutout.id,
        sender_id: shoutout.sender_id,
        sender,
        message: shoutout.message,
        image_url: shoutout.image_url,
        created_at: shoutout.created_at,
        recipients,
        reactions: Vec::new(),
        comments_count: 0,
    })
}
