use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Clap,
    Star,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Clap => "clap",
            ReactionType::Star => "star",
        }
    }
}

impl FromStr for ReactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionType::Like),
            "clap" => Ok(ReactionType::Clap),
            "star" => Ok(ReactionType::Star),
            other => Err(AppError::DatabaseError(format!("Unknown reaction type '{}' in stored reaction", other))),
        }
    }
}

/// One user's reaction of one type on a shoutout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: i64,
    pub shoutout_id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReaction {
    pub shoutout_id: i64,
    pub user_id: i64,
    pub reaction_type: ReactionType,
}

#[derive(Debug, Deserialize)]
pub struct ToggleReactionRequest {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
}
