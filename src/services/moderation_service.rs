use std::sync::Arc;

use crate::auth::Claims;
use crate::db::repository::{
    AdminLogRepository, CommentRepository, ReportRepository, ShoutoutRepository, UserRepository,
};
use crate::models::admin::NewAdminLog;
use crate::models::report::{CreateReportRequest, NewReport};
use crate::models::validation::{required_text, MAX_REASON_LEN};
use crate::models::{AdminAction, AdminLog, PendingReport, Report, ReportStatus, TargetType};
use crate::services::{user_directory, ShoutoutService};
use crate::{AppError, Result};

/// Reports raised by users and the admin actions that settle them.
/// Every admin action writes an audit log entry.
pub struct ModerationService {
    shoutout_repo: Arc<dyn ShoutoutRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    report_repo: Arc<dyn ReportRepository>,
    admin_log_repo: Arc<dyn AdminLogRepository>,
    user_repo: Arc<dyn UserRepository>,
    shoutout_service: Arc<ShoutoutService>,
}

impl ModerationService {
    pub fn new(
        shoutout_repo: Arc<dyn ShoutoutRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        report_repo: Arc<dyn ReportRepository>,
        admin_log_repo: Arc<dyn AdminLogRepository>,
        user_repo: Arc<dyn UserRepository>,
        shoutout_service: Arc<ShoutoutService>,
    ) -> Self {
        Self {
            shoutout_repo,
            comment_repo,
            report_repo,
            admin_log_repo,
            user_repo,
            shoutout_service,
        }
    }

    pub async fn report_shoutout(
        &self,
        shoutout_id: i64,
        request: CreateReportRequest,
        reporter: &Claims,
    ) -> Result<Report> {
        let reason = required_text("reason", &request.reason, MAX_REASON_LEN)?;
        if self.shoutout_repo.get_shoutout_by_id(shoutout_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Shoutout {} not found", shoutout_id)));
        }

        let report = self
            .report_repo
            .create_report(&NewReport {
                shoutout_id,
                reported_by: reporter.user_id,
                reason,
            })
            .await?;

        tracing::info!("🚩 Shoutout {} reported by user {} (report {})", shoutout_id, reporter.user_id, report.id);
        Ok(report)
    }

    /// Pending reports with their shoutout attached. Reports whose shoutout is gone
    /// are skipped.
    pub async fn pending_reports(&self) -> Result<Vec<PendingReport>> {
        let reports = self.report_repo.get_pending_reports().await?;
        let users = user_directory(self.user_repo.as_ref()).await?;

        let mut pending = Vec::with_capacity(reports.len());
        for report in reports {
            let Some(shoutout) = self.shoutout_repo.get_shoutout_by_id(report.shoutout_id).await? else {
                continue;
            };
            let shoutout = self.shoutout_service.hydrate(shoutout, &users).await?;
            pending.push(PendingReport { report, shoutout });
        }
        Ok(pending)
    }

    pub async fn resolve_report(&self, report_id: i64, admin: &Claims) -> Result<Report> {
        let existing = self
            .report_repo
            .get_report_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        if existing.status == ReportStatus::Resolved {
            return Ok(existing);
        }

        let report = self
            .report_repo
            .resolve_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        self.record(admin, AdminAction::ResolvedReport, report.shoutout_id, TargetType::Shoutout)
            .await?;
        Ok(report)
    }

    /// Deletes a shoutout together with its comments, reactions and reports.
    pub async fn delete_shoutout(&self, shoutout_id: i64, admin: &Claims) -> Result<()> {
        let removed = self
            .shoutout_repo
            .delete_shoutout_cascade(shoutout_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shoutout {} not found", shoutout_id)))?;

        tracing::info!(
            "🗑️ Shoutout {} deleted by admin {} ({} comments, {} reactions, {} reports removed)",
            shoutout_id,
            admin.user_id,
            removed.comments,
            removed.reactions,
            removed.reports
        );
        self.record(admin, AdminAction::DeletedShoutout, shoutout_id, TargetType::Shoutout)
            .await?;
        Ok(())
    }

    pub async fn delete_comment(&self, comment_id: i64, admin: &Claims) -> Result<()> {
        let not_found = || AppError::NotFound(format!("Comment {} not found", comment_id));

        let comment = self.comment_repo.get_comment_by_id(comment_id).await?.ok_or_else(not_found)?;
        // Lost a race with another delete of the same comment or its shoutout
        if !self.comment_repo.delete_comment(comment_id).await? {
            return Err(not_found());
        }

        tracing::info!(
            "🗑️ Comment {} on shoutout {} deleted by admin {}",
            comment_id,
            comment.shoutout_id,
            admin.user_id
        );
        self.record(admin, AdminAction::DeletedComment, comment_id, TargetType::Comment)
            .await?;
        Ok(())
    }

    pub async fn admin_logs(&self) -> Result<Vec<AdminLog>> {
        self.admin_log_repo.list_logs().await
    }

    async fn record(
        &self,
        admin: &Claims,
        action: AdminAction,
        target_id: i64,
        target_type: TargetType,
    ) -> Result<AdminLog> {
        self.admin_log_repo
            .create_log(&NewAdminLog {
                admin_id: admin.user_id,
                admin_name: admin.name.clone(),
                action,
                target_id,
                target_type,
            })
            .await
    }
}
