use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserResponse;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub shoutout_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub shoutout_id: i64,
    pub user_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub shoutout_id: i64,
    pub user_id: i64,
    pub user: UserResponse, // Author, resolved by the service layer
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: Comment, user: UserResponse) -> Self {
        Self {
            id: comment.id,
            shoutout_id: comment.shoutout_id,
            user_id: comment.user_id,
            user,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}
