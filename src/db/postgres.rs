// PostgreSQL repository implementations using sqlx
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::db::repository::{
    AdminLogRepository, CascadeSummary, CommentRepository, ReactionRepository, ReportRepository,
    ShoutoutRepository, UserRepository,
};
use crate::models::admin::NewAdminLog;
use crate::models::comment::NewComment;
use crate::models::reaction::NewReaction;
use crate::models::report::NewReport;
use crate::models::shoutout::NewShoutout;
use crate::models::user::NewUser;
use crate::models::{AdminLog, Comment, Reaction, Report, ReportStatus, Shoutout, User};
use crate::{AppError, Result};

// PostgreSQL connection pool wrapper
pub struct PostgresDatabase {
    pub pool: Arc<PgPool>,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> Result<Self> {
        tracing::info!("🔗 DATABASE: Configuring connection pool (max 20 connections)");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| {
                tracing::error!("❌ DATABASE: Failed to create connection pool: {}", e);
                AppError::DatabaseError(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("✅ DATABASE: Connection pool ready and schema migrated");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub fn user_repo(&self) -> PostgresUserRepository {
        PostgresUserRepository { pool: self.pool.clone() }
    }

    pub fn shoutout_repo(&self) -> PostgresShoutoutRepository {
        PostgresShoutoutRepository { pool: self.pool.clone() }
    }

    pub fn comment_repo(&self) -> PostgresCommentRepository {
        PostgresCommentRepository { pool: self.pool.clone() }
    }

    pub fn reaction_repo(&self) -> PostgresReactionRepository {
        PostgresReactionRepository { pool: self.pool.clone() }
    }

    pub fn report_repo(&self) -> PostgresReportRepository {
        PostgresReportRepository { pool: self.pool.clone() }
    }

    pub fn admin_log_repo(&self) -> PostgresAdminLogRepository {
        PostgresAdminLogRepository { pool: self.pool.clone() }
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}

/// A foreign key miss on a dependent insert means the shoutout was deleted first.
fn dependent_insert_error(e: sqlx::Error, action: &str, shoutout_id: i64) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound(format!("Shoutout {} not found", shoutout_id))
        }
        other => AppError::DatabaseError(format!("Failed to {}: {}", action, other)),
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    department: String,
    role: String,
    password_hash: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            department: row.department,
            role: row.role.parse()?,
            password_hash: row.password_hash,
            joined_at: row.joined_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, department, role, password_hash, joined_at";

// PostgreSQL User Repository
pub struct PostgresUserRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (name, email, department, role, password_hash) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.department)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("Email {} is already registered", user.email))
                }
                other => AppError::DatabaseError(format!("Failed to create user: {}", other)),
            })?;

        row.try_into()
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get user by id: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get user by email: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list users: {}", e)))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let sql = format!(
            "UPDATE users SET name = $2, department = $3, role = $4, password_hash = $5 \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.department)
            .bind(user.role.as_str())
            .bind(&user.password_hash)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to update user: {}", e)))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(AppError::NotFound(format!("User {} not found", user.id))),
        }
    }

    async fn count_users(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count users: {}", e)))?;
        Ok(count as u64)
    }
}

#[derive(sqlx::FromRow)]
struct ShoutoutRow {
    id: i64,
    sender_id: i64,
    message: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    recipient_ids: Vec<i64>,
}

impl From<ShoutoutRow> for Shoutout {
    fn from(row: ShoutoutRow) -> Self {
        Shoutout {
            id: row.id,
            sender_id: row.sender_id,
            message: row.message,
            image_url: row.image_url,
            created_at: row.created_at,
            recipient_ids: row.recipient_ids,
        }
    }
}

const SHOUTOUT_SELECT: &str = r#"
    SELECT s.id, s.sender_id, s.message, s.image_url, s.created_at,
           COALESCE(ARRAY_AGG(r.user_id ORDER BY r.position) FILTER (WHERE r.user_id IS NOT NULL), '{}') AS recipient_ids
    FROM shoutouts s
    LEFT JOIN shoutout_recipients r ON r.shoutout_id = s.id
"#;

// PostgreSQL Shoutout Repository
pub struct PostgresShoutoutRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl ShoutoutRepository for PostgresShoutoutRepository {
    async fn create_shoutout(&self, shoutout: &NewShoutout) -> Result<Shoutout> {
        let mut tx = self.pool.begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO shoutouts (sender_id, message, image_url) VALUES ($1, $2, $3) \
             RETURNING id, created_at",
        )
        .bind(shoutout.sender_id)
        .bind(&shoutout.message)
        .bind(&shoutout.image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create shoutout: {}", e)))?;

        for (position, user_id) in shoutout.recipient_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO shoutout_recipients (shoutout_id, user_id, position) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(user_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to tag recipient: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit shoutout: {}", e)))?;

        Ok(Shoutout {
            id,
            sender_id: shoutout.sender_id,
            message: shoutout.message.clone(),
            image_url: shoutout.image_url.clone(),
            created_at,
            recipient_ids: shoutout.recipient_ids.clone(),
        })
    }

    async fn get_shoutout_by_id(&self, id: i64) -> Result<Option<Shoutout>> {
        let sql = format!("{} WHERE s.id = $1 GROUP BY s.id", SHOUTOUT_SELECT);
        let row = sqlx::query_as::<_, ShoutoutRow>(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get shoutout: {}", e)))?;

        Ok(row.map(Shoutout::from))
    }

    async fn list_shoutouts(&self) -> Result<Vec<Shoutout>> {
        let sql = format!("{} GROUP BY s.id ORDER BY s.created_at DESC, s.id DESC", SHOUTOUT_SELECT);
        let rows = sqlx::query_as::<_, ShoutoutRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list shoutouts: {}", e)))?;

        Ok(rows.into_iter().map(Shoutout::from).collect())
    }

    async fn delete_shoutout_cascade(&self, id: i64) -> Result<Option<CascadeSummary>> {
        let mut tx = self.pool.begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // Row lock blocks concurrent dependent inserts until the delete commits
        let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM shoutouts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to lock shoutout: {}", e)))?;
        if locked.is_none() {
            return Ok(None);
        }

        let mut removed = [0u64; 3];
        for (slot, table) in removed.iter_mut().zip(["comments", "reactions", "reports"]) {
            let sql = format!("DELETE FROM {} WHERE shoutout_id = $1", table);
            *slot = sqlx::query(&sql)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to delete {}: {}", table, e)))?
                .rows_affected();
        }

        sqlx::query("DELETE FROM shoutouts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete shoutout: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit shoutout delete: {}", e)))?;

        let [comments, reactions, reports] = removed;
        Ok(Some(CascadeSummary { comments, reactions, reports }))
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    shoutout_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            shoutout_id: row.shoutout_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

// PostgreSQL Comment Repository
pub struct PostgresCommentRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (shoutout_id, user_id, content) VALUES ($1, $2, $3) \
             RETURNING id, shoutout_id, user_id, content, created_at",
        )
        .bind(comment.shoutout_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| dependent_insert_error(e, "create comment", comment.shoutout_id))?;

        Ok(row.into())
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, shoutout_id, user_id, content, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get comment: {}", e)))?;

        Ok(row.map(Comment::from))
    }

    async fn get_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, shoutout_id, user_id, content, created_at FROM comments \
             WHERE shoutout_id = $1 ORDER BY created_at, id",
        )
        .bind(shoutout_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get comments: {}", e)))?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn count_comments_by_shoutout_id(&self, shoutout_id: i64) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE shoutout_id = $1")
            .bind(shoutout_id)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count comments: {}", e)))?;
        Ok(count as u64)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete comment: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ReactionRow {
    id: i64,
    shoutout_id: i64,
    user_id: i64,
    reaction_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReactionRow> for Reaction {
    type Error = AppError;

    fn try_from(row: ReactionRow) -> Result<Self> {
        Ok(Reaction {
            id: row.id,
            shoutout_id: row.shoutout_id,
            user_id: row.user_id,
            reaction_type: row.reaction_type.parse()?,
            created_at: row.created_at,
        })
    }
}

// PostgreSQL Reaction Repository
pub struct PostgresReactionRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn toggle_reaction(&self, reaction: &NewReaction) -> Result<bool> {
        let mut tx = self.pool.begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // A conflicting insert waits on the other writer's unique key, so two
        // concurrent toggles always settle as one add and one remove.
        let inserted: Option<i64> = sqlx::query_scalar(
            "INSERT INTO reactions (shoutout_id, user_id, reaction_type) VALUES ($1, $2, $3) \
             ON CONFLICT (shoutout_id, user_id, reaction_type) DO NOTHING RETURNING id",
        )
        .bind(reaction.shoutout_id)
        .bind(reaction.user_id)
        .bind(reaction.reaction_type.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| dependent_insert_error(e, "add reaction", reaction.shoutout_id))?;

        if inserted.is_none() {
            sqlx::query(
                "DELETE FROM reactions WHERE shoutout_id = $1 AND user_id = $2 AND reaction_type = $3",
            )
            .bind(reaction.shoutout_id)
            .bind(reaction.user_id)
            .bind(reaction.reaction_type.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to remove reaction: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit reaction toggle: {}", e)))?;

        Ok(inserted.is_some())
    }

    async fn get_reactions_by_shoutout_id(&self, shoutout_id: i64) -> Result<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionRow>(
            "SELECT id, shoutout_id, user_id, reaction_type, created_at FROM reactions \
             WHERE shoutout_id = $1 ORDER BY id",
        )
        .bind(shoutout_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get reactions: {}", e)))?;

        rows.into_iter().map(Reaction::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: i64,
    shoutout_id: i64,
    reported_by: i64,
    reason: String,
    created_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<ReportRow> for Report {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self> {
        Ok(Report {
            id: row.id,
            shoutout_id: row.shoutout_id,
            reported_by: row.reported_by,
            reason: row.reason,
            created_at: row.created_at,
            status: row.status.parse()?,
        })
    }
}

const REPORT_COLUMNS: &str = "id, shoutout_id, reported_by, reason, created_at, status";

// PostgreSQL Report Repository
pub struct PostgresReportRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create_report(&self, report: &NewReport) -> Result<Report> {
        let sql = format!(
            "INSERT INTO reports (shoutout_id, reported_by, reason) VALUES ($1, $2, $3) RETURNING {}",
            REPORT_COLUMNS
        );
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(report.shoutout_id)
            .bind(report.reported_by)
            .bind(&report.reason)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| dependent_insert_error(e, "create report", report.shoutout_id))?;

        row.try_into()
    }

    async fn get_report_by_id(&self, id: i64) -> Result<Option<Report>> {
        let sql = format!("SELECT {} FROM reports WHERE id = $1", REPORT_COLUMNS);
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get report: {}", e)))?;

        row.map(Report::try_from).transpose()
    }

    async fn get_pending_reports(&self) -> Result<Vec<Report>> {
        let sql = format!(
            "SELECT {} FROM reports WHERE status = $1 ORDER BY created_at, id",
            REPORT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(ReportStatus::Pending.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to get pending reports: {}", e)))?;

        rows.into_iter().map(Report::try_from).collect()
    }

    async fn resolve_report(&self, id: i64) -> Result<Option<Report>> {
        let sql = format!(
            "UPDATE reports SET status = $2 WHERE id = $1 RETURNING {}",
            REPORT_COLUMNS
        );
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id)
            .bind(ReportStatus::Resolved.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to resolve report: {}", e)))?;

        row.map(Report::try_from).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct AdminLogRow {
    id: i64,
    admin_id: i64,
    admin_name: String,
    action: String,
    target_id: i64,
    target_type: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<AdminLogRow> for AdminLog {
    type Error = AppError;

    fn try_from(row: AdminLogRow) -> Result<Self> {
        Ok(AdminLog {
            id: row.id,
            admin_id: row.admin_id,
            admin_name: row.admin_name,
            action: row.action.parse()?,
            target_id: row.target_id,
            target_type: row.target_type.parse()?,
            timestamp: row.timestamp,
        })
    }
}

// PostgreSQL Admin Log Repository
pub struct PostgresAdminLogRepository {
    pool: Arc<PgPool>,
}

#[async_trait]
impl AdminLogRepository for PostgresAdminLogRepository {
    async fn create_log(&self, log: &NewAdminLog) -> Result<AdminLog> {
        let row = sqlx::query_as::<_, AdminLogRow>(
            "INSERT INTO admin_logs (admin_id, admin_name, action, target_id, target_type) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, admin_id, admin_name, action, target_id, target_type, timestamp",
        )
        .bind(log.admin_id)
        .bind(&log.admin_name)
        .bind(log.action.as_str())
        .bind(log.target_id)
        .bind(log.target_type.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to write admin log: {}", e)))?;

        row.try_into()
    }

    async fn list_logs(&self) -> Result<Vec<AdminLog>> {
        let rows = sqlx::query_as::<_, AdminLogRow>(
            "SELECT id, admin_id, admin_name, action, target_id, target_type, timestamp \
             FROM admin_logs ORDER BY id DESC",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list admin logs: {}", e)))?;

        rows.into_iter().map(AdminLog::try_from).collect()
    }
}
