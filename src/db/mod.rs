pub mod postgres;
pub mod repository;

// Database connection and state management
use std::sync::Arc;

use crate::config::AppConfig;
use crate::Result;
use repository::{
    AdminLogRepository, CommentRepository, InMemoryDatabase, ReactionRepository, ReportRepository,
    ShoutoutRepository, UserRepository,
};

#[derive(Clone)]
pub struct DatabaseClient {
    pub user_repo: Arc<dyn UserRepository>,
    pub shoutout_repo: Arc<dyn ShoutoutRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub reaction_repo: Arc<dyn ReactionRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub admin_log_repo: Arc<dyn AdminLogRepository>,
    postgres: Option<Arc<postgres::PostgresDatabase>>,
}

impl DatabaseClient {
    /// Connects to PostgreSQL when `DATABASE_URL` is configured, otherwise keeps
    /// everything in process memory.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        match &config.database_url {
            Some(url) => {
                let database = postgres::PostgresDatabase::new(url).await?;
                Ok(Self::from_postgres(database))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using the in-memory store (data is lost on restart)");
                Ok(Self::in_memory())
            }
        }
    }

    /// Every repository handle points at the same store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryDatabase::new());
        Self {
            user_repo: store.clone(),
            shoutout_repo: store.clone(),
            comment_repo: store.clone(),
            reaction_repo: store.clone(),
            report_repo: store.clone(),
            admin_log_repo: store,
            postgres: None,
        }
    }

    fn from_postgres(database: postgres::PostgresDatabase) -> Self {
        Self {
            user_repo: Arc::new(database.user_repo()),
            shoutout_repo: Arc::new(database.shoutout_repo()),
            comment_repo: Arc::new(database.comment_repo()),
            reaction_repo: Arc::new(database.reaction_repo()),
            report_repo: Arc::new(database.report_repo()),
            admin_log_repo: Arc::new(database.admin_log_repo()),
            postgres: Some(Arc::new(database)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.postgres.is_some() {
            "postgres"
        } else {
            "in_memory"
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        match &self.postgres {
            Some(database) => database.health_check().await,
            None => Ok(()),
        }
    }
}
