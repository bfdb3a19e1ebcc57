use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::user::UserResponse;
use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    DeletedShoutout,
    DeletedComment,
    ResolvedReport,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::DeletedShoutout => "DELETED_SHOUTOUT",
            AdminAction::DeletedComment => "DELETED_COMMENT",
            AdminAction::ResolvedReport => "RESOLVED_REPORT",
        }
    }
}

impl FromStr for AdminAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DELETED_SHOUTOUT" => Ok(AdminAction::DeletedShoutout),
            "DELETED_COMMENT" => Ok(AdminAction::DeletedComment),
            "RESOLVED_REPORT" => Ok(AdminAction::ResolvedReport),
            other => Err(AppError::DatabaseError(format!("Unknown admin action '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Shoutout,
    Comment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Shoutout => "shoutout",
            TargetType::Comment => "comment",
        }
    }
}

impl FromStr for TargetType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoutout" => Ok(TargetType::Shoutout),
            "comment" => Ok(TargetType::Comment),
            other => Err(AppError::DatabaseError(format!("Unknown target type '{}'", other))),
        }
    }
}

/// Audit trail entry written by every moderation action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLog {
    pub id: i64,
    pub admin_id: i64,
    pub admin_name: String,
    pub action: AdminAction,
    pub target_id: i64,
    pub target_type: TargetType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdminLog {
    pub admin_id: i64,
    pub admin_name: String,
    pub action: AdminAction,
    pub target_id: i64,
    pub target_type: TargetType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_shoutouts: u64,
    pub total_active_users: u64,
    pub top_contributors: Vec<NameCount>,
    pub most_tagged_users: Vec<NameCount>,
    pub department_engagement: Vec<DepartmentCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub user: UserResponse,
    pub sent: u64,
    pub received: u64,
    pub points: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_uses_screaming_snake_case_on_the_wire() {
        let json = serde_json::to_string(&AdminAction::DeletedShoutout).unwrap();
        assert_eq!(json, "\"DELETED_SHOUTOUT\"");
        assert_eq!(
            "RESOLVED_REPORT".parse::<AdminAction>().unwrap(),
            AdminAction::ResolvedReport
        );
    }

    #[test]
    fn stats_serialize_in_camel_case() {
        let stats = AdminStats {
            total_shoutouts: 2,
            total_active_users: 4,
            top_contributors: vec![],
            most_tagged_users: vec![],
            department_engagement: vec![],
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalShoutouts"], 2);
        assert_eq!(value["totalActiveUsers"], 4);
        assert!(value.get("departmentEngagement").is_some());
    }
}
