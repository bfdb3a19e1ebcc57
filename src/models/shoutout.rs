use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::reaction::Reaction;
use crate::models::user::UserResponse;
use crate::models::validation::{optional_url, required_text, MAX_MESSAGE_LEN};
use crate::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Shoutout {
    pub id: i64,
    pub sender_id: i64,
    pub message: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub recipient_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewShoutout {
    pub sender_id: i64,
    pub message: String,
    pub image_url: Option<String>,
    pub recipient_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoutoutRequest {
    pub message: String,
    #[serde(default)]
    pub recipient_ids: Vec<i64>,
    pub image_url: Option<String>,
}

impl CreateShoutoutRequest {
    /// Checks the body and builds the row to insert. Recipient existence is checked
    /// by the service, which owns the user store.
    pub fn into_new_shoutout(self, sender_id: i64) -> Result<NewShoutout> {
        let message = required_text("message", &self.message, MAX_MESSAGE_LEN)?;
        let image_url = optional_url("image_url", self.image_url.as_deref())?;

        let mut recipient_ids = Vec::with_capacity(self.recipient_ids.len());
        for id in self.recipient_ids {
            if !recipient_ids.contains(&id) {
                recipient_ids.push(id);
            }
        }
        if recipient_ids.is_empty() {
            return Err(AppError::ValidationError(
                "A shoutout needs at least one recipient".to_string(),
            ));
        }

        Ok(NewShoutout {
            sender_id,
            message,
            image_url,
            recipient_ids,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoutoutResponse {
    pub id: i64,
    pub sender_id: i64,
    pub sender: UserResponse,
    pub message: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub recipients: Vec<UserResponse>,
    pub reactions: Vec<Reaction>,
    pub comments_count: u64,
}

/// Feed filters. Every populated field must match.
#[derive(Debug, Clone, Default)]
pub struct ShoutoutFilter {
    pub department: Option<String>,
    pub sender_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub query: Option<String>,
}

impl ShoutoutFilter {
    pub fn matches(&self, shoutout: &ShoutoutResponse) -> bool {
        if let Some(department) = &self.department {
            if &shoutout.sender.department != department {
                return false;
            }
        }
        if let Some(sender_id) = self.sender_id {
            if shoutout.sender_id != sender_id {
                return false;
            }
        }
        if let Some(recipient_id) = self.recipient_id {
            if !shoutout.recipients.iter().any(|r| r.id == recipient_id) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            if !shoutout.message.to_lowercase().contains(&needle)
                && !shoutout.sender.name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
