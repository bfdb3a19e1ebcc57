use std::sync::Arc;

use crate::db::repository::{ReactionRepository, ShoutoutRepository};
use crate::models::reaction::NewReaction;
use crate::models::{Reaction, ReactionType};
use crate::{AppError, Result};

/// Toggle-style reactions: a second identical reaction removes the first
pub struct ReactionService {
    reaction_repo: Arc<dyn ReactionRepository>,
    shoutout_repo: Arc<dyn ShoutoutRepository>,
}

impl ReactionService {
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        shoutout_repo: Arc<dyn ShoutoutRepository>,
    ) -> Self {
        Self {
            reaction_repo,
            shoutout_repo,
        }
    }

    async fn ensure_shoutout_exists(&self, shoutout_id: i64) -> Result<()> {
        match self.shoutout_repo.get_shoutout_by_id(shoutout_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Shoutout {} not found", shoutout_id))),
        }
    }

    /// Returns the shoutout's reactions after the toggle.
    pub async fn toggle_reaction(
        &self,
        shoutout_id: i64,
        user_id: i64,
        reaction_type: ReactionType,
    ) -> Result<Vec<Reaction>> {
        self.ensure_shoutout_exists(shoutout_id).await?;

        let added = self
            .reaction_repo
            .toggle_reaction(&NewReaction {
                shoutout_id,
                user_id,
                reaction_type,
            })
            .await?;

        tracing::debug!(
            "👏 User {} {} '{}' on shoutout {}",
            user_id,
            if added { "added" } else { "removed" },
            reaction_type.as_str(),
            shoutout_id
        );

        self.reaction_repo.get_reactions_by_shoutout_id(shoutout_id).await
    }

    pub async fn get_reactions(&self, shoutout_id: i64) -> Result<Vec<Reaction>> {
        self.ensure_shoutout_exists(shoutout_id).await?;
        self.reaction_repo.get_reactions_by_shoutout_id(shoutout_id).await
    }
}
