use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::shoutout::ShoutoutResponse;
use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(AppError::DatabaseError(format!("Unknown report status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub shoutout_id: i64,
    pub reported_by: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub shoutout_id: i64,
    pub reported_by: i64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub reason: String,
}

/// A pending report together with the shoutout under review
#[derive(Debug, Clone, Serialize)]
pub struct PendingReport {
    #[serde(flatten)]
    pub report: Report,
    pub shoutout: ShoutoutResponse,
}
