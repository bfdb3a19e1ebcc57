// Repository trait abstractions for database operations
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::models::admin::NewAdminLog;
use crate::models::comment::NewComment;
use crate::models::reaction::NewReaction;
use crate::models::report::NewReport;
use crate::models::shoutout::NewShoutout;
use crate::models::user::NewUser;
use crate::models::{AdminLog, Comment, Reaction, Report, ReportStatus, Shoutout, User};
use crate::{AppError, Result};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create_user(&self, user: &NewUser) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn update_user(&self, user: &User) -> Result<User>;
    async fn count_users(&self) -> Result<u64>;
}

/// Rows removed together with a shoutout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub comments: u64,
    pub reactions: u64,
    pub reports: u64,
}

#[async_trait]
pub trait ShoutoutRepository: Send + Sync {
    async fn create_shoutout(&self, shoutout: &NewShoutout) -> Result<Shoutout>;
    async fn get_shoutout_by_id(&self, id: i64) -> Result<Option<Shoutout>>;
    /// Newest first.
    async fn list_shoutouts(&self) -> Result<Vec<Shoutout>>;
    /// Removes the shoutout with its comments, reactions and reports as one unit.
    /// `None` when no shoutout had that id.
    async fn delete_shoutout_cascade(&self, id: i64) -> Result<Option<CascadeSummary>>;
}

// Dependent rows fail with `NotFound` when their shoutout does not exist.

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>>;
    /// Oldest first.
    async fn get_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Comment>>;
    async fn count_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<u64>;
    async fn delete_comment(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Removes the caller's reaction of that type if present, adds it otherwise.
    /// Returns true when the reaction was added.
    async fn toggle_reaction(&self, reaction: &NewReaction) -> Result<bool>;
    async fn get_reactions_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Reaction>>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create_report(&self, report: &NewReport) -> Result<Report>;
    async fn get_report_by_id(&self, id: i64) -> Result<Option<Report>>;
    /// Pending reports, oldest first.
    async fn get_pending_reports(&self) -> Result<Vec<Report>>;
    async fn resolve_report(&self, id: i64) -> Result<Option<Report>>;
}

#[async_trait]
pub trait AdminLogRepository: Send + Sync {
    async fn create_log(&self, log: &NewAdminLog) -> Result<AdminLog>;
    /// Newest first.
    async fn list_logs(&self) -> Result<Vec<AdminLog>>;
}

// In-memory implementation used when no DATABASE_URL is configured

struct IdSequence(AtomicI64);

impl IdSequence {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Process-local store implementing every repository trait.
///
/// Lock order is shoutouts first, then the dependent tables. Comments, reactions
/// and reports are written while the shoutouts read lock is held, and the cascade
/// delete holds the write lock, so no dependent row can outlive its shoutout.
pub struct InMemoryDatabase {
    users: RwLock<BTreeMap<i64, User>>, // id -> User
    shoutouts: RwLock<BTreeMap<i64, Shoutout>>,
    comments: RwLock<BTreeMap<i64, Comment>>,
    reactions: RwLock<BTreeMap<i64, Reaction>>,
    reports: RwLock<BTreeMap<i64, Report>>,
    logs: RwLock<Vec<AdminLog>>,
    user_ids: IdSequence,
    shoutout_ids: IdSequence,
    comment_ids: IdSequence,
    reaction_ids: IdSequence,
    report_ids: IdSequence,
    log_ids: IdSequence,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            shoutouts: RwLock::new(BTreeMap::new()),
            comments: RwLock::new(BTreeMap::new()),
            reactions: RwLock::new(BTreeMap::new()),
            reports: RwLock::new(BTreeMap::new()),
            logs: RwLock::new(Vec::new()),
            user_ids: IdSequence::new(),
            shoutout_ids: IdSequence::new(),
            comment_ids: IdSequence::new(),
            reaction_ids: IdSequence::new(),
            report_ids: IdSequence::new(),
            log_ids: IdSequence::new(),
        }
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_shoutout(id: i64) -> AppError {
    AppError::NotFound(format!("Shoutout {} not found", id))
}

/// Drops every row of `table` that belongs to `shoutout_id`, returning how many went.
fn remove_for_shoutout<T>(
    table: &mut BTreeMap<i64, T>,
    shoutout_id: i64,
    owner: impl Fn(&T) -> i64,
) -> u64 {
    let before = table.len();
    table.retain(|_, row| owner(row) != shoutout_id);
    (before - table.len()) as u64
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("Email {} is already registered", user.email)));
        }

        let created = User {
            id: self.user_ids.next(),
            name: user.name.clone(),
            email: user.email.clone(),
            department: user.department.clone(),
            role: user.role,
            password_hash: user.password_hash.clone(),
            joined_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(AppError::NotFound(format!("User {} not found", user.id))),
        }
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[async_trait]
impl ShoutoutRepository for InMemoryDatabase {
    async fn create_shoutout(&self, shoutout: &NewShoutout) -> Result<Shoutout> {
        let created = Shoutout {
            id: self.shoutout_ids.next(),
            sender_id: shoutout.sender_id,
            message: shoutout.message.clone(),
            image_url: shoutout.image_url.clone(),
            created_at: Utc::now(),
            recipient_ids: shoutout.recipient_ids.clone(),
        };
        self.shoutouts.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_shoutout_by_id(&self, id: i64) -> Result<Option<Shoutout>> {
        Ok(self.shoutouts.read().await.get(&id).cloned())
    }

    async fn list_shoutouts(&self) -> Result<Vec<Shoutout>> {
        let shoutouts = self.shoutouts.read().await;
        let mut list: Vec<Shoutout> = shoutouts.values().cloned().collect();
        // Sort by created_at descending (newest first), id breaks ties
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn delete_shoutout_cascade(&self, id: i64) -> Result<Option<CascadeSummary>> {
        let mut shoutouts = self.shoutouts.write().await;
        if shoutouts.remove(&id).is_none() {
            return Ok(None);
        }

        let mut comments = self.comments.write().await;
        let mut reactions = self.reactions.write().await;
        let mut reports = self.reports.write().await;
        Ok(Some(CascadeSummary {
            comments: remove_for_shoutout(&mut comments, id, |c| c.shoutout_id),
            reactions: remove_for_shoutout(&mut reactions, id, |r| r.shoutout_id),
            reports: remove_for_shoutout(&mut reports, id, |r| r.shoutout_id),
        }))
    }
}

#[async_trait]
impl CommentRepository for InMemoryDatabase {
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let shoutouts = self.shoutouts.read().await;
        if !shoutouts.contains_key(&comment.shoutout_id) {
            return Err(missing_shoutout(comment.shoutout_id));
        }

        let created = Comment {
            id: self.comment_ids.next(),
            shoutout_id: comment.shoutout_id,
            user_id: comment.user_id,
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        self.comments.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn get_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|c| c.shoutout_id == shoutout_id)
            .cloned()
            .collect())
    }

    async fn count_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<u64> {
        let comments = self.comments.read().await;
        Ok(comments.values().filter(|c| c.shoutout_id == shoutout_id).count() as u64)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        Ok(self.comments.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryDatabase {
    async fn toggle_reaction(&self, reaction: &NewReaction) -> Result<bool> {
        let shoutouts = self.shoutouts.read().await;
        if !shoutouts.contains_key(&reaction.shoutout_id) {
            return Err(missing_shoutout(reaction.shoutout_id));
        }

        let mut reactions = self.reactions.write().await;
        let existing = reactions
            .values()
            .find(|r| {
                r.shoutout_id == reaction.shoutout_id
                    && r.user_id == reaction.user_id
                    && r.reaction_type == reaction.reaction_type
            })
            .map(|r| r.id);

        match existing {
            Some(id) => {
                reactions.remove(&id);
                Ok(false)
            }
            None => {
                let created = Reaction {
                    id: self.reaction_ids.next(),
                    shoutout_id: reaction.shoutout_id,
                    user_id: reaction.user_id,
                    reaction_type: reaction.reaction_type,
                    created_at: Utc::now(),
                };
                reactions.insert(created.id, created);
                Ok(true)
            }
        }
    }

    async fn get_reactions_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Reaction>> {
        let reactions = self.reactions.read().await;
        Ok(reactions
            .values()
            .filter(|r| r.shoutout_id == shoutout_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReportRepository for InMemoryDatabase {
    async fn create_report(&self, report: &NewReport) -> Result<Report> {
        let shoutouts = self.shoutouts.read().await;
        if !shoutouts.contains_key(&report.shoutout_id) {
            return Err(missing_shoutout(report.shoutout_id));
        }

        let created = Report {
            id: self.report_ids.next(),
            shoutout_id: report.shoutout_id,
            reported_by: report.reported_by,
            reason: report.reason.clone(),
            created_at: Utc::now(),
            status: ReportStatus::Pending,
        };
        self.reports.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_report_by_id(&self, id: i64) -> Result<Option<Report>> {
        Ok(self.reports.read().await.get(&id).cloned())
    }

    async fn get_pending_reports(&self) -> Result<Vec<Report>> {
        let reports = self.reports.read().await;
        Ok(reports
            .values()
            .filter(|r| r.status == ReportStatus::Pending)
            .cloned()
            .collect())
    }

    async fn resolve_report(&self, id: i64) -> Result<Option<Report>> {
        let mut reports = self.reports.write().await;
        Ok(reports.get_mut(&id).map(|report| {
            report.status = ReportStatus::Resolved;
            report.clone()
        }))
    }
}

#[async_trait]
impl AdminLogRepository for InMemoryDatabase {
    async fn create_log(&self, log: &NewAdminLog) -> Result<AdminLog> {
        let created = AdminLog {
            id: self.log_ids.next(),
            admin_id: log.admin_id,
            admin_name: log.admin_name.clone(),
            action: log.action,
            target_id: log.target_id,
            target_type: log.target_type,
            timestamp: Utc::now(),
        };
        self.logs.write().await.push(created.clone());
        Ok(created)
    }

    async fn list_logs(&self) -> Result<Vec<AdminLog>> {
        let logs = self.logs.read().await;
        Ok(logs.iter().rev().cloned().collect())
    }
}
