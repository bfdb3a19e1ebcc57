// Library modules for the BragBoard recognition API
pub mod config;
pub mod models;
pub mod db;
pub mod routes;
pub mod services;
pub mod auth;
pub mod error;
pub mod extract;
pub mod seed;

use std::sync::Arc;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use config::AppConfig;

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: db::DatabaseClient,
    pub auth_service: Arc<auth::AuthService>,
    pub user_service: Arc<services::UserService>,
    pub shoutout_service: Arc<services::ShoutoutService>,
    pub comment_service: Arc<services::CommentService>,
    pub reaction_service: Arc<services::ReactionService>,
    pub moderation_service: Arc<services::ModerationService>,
    pub stats_service: Arc<services::StatsService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let db = db::DatabaseClient::new(&config).await?;
        Ok(Self::with_database(config, db))
    }

    /// Wires every service to the given store.
    pub fn with_database(config: AppConfig, db: db::DatabaseClient) -> Self {
        let auth_service = Arc::new(auth::AuthService::new(&config.jwt_secret, config.jwt_expiry_hours));
        let user_service = Arc::new(services::UserService::new(db.user_repo.clone()));
        let shoutout_service = Arc::new(services::ShoutoutService::new(
            db.shoutout_repo.clone(),
            db.user_repo.clone(),
            db.comment_repo.clone(),
            db.reaction_repo.clone(),
        ));
        let comment_service = Arc::new(services::CommentService::new(
            db.comment_repo.clone(),
            db.shoutout_repo.clone(),
            db.user_repo.clone(),
        ));
        let reaction_service = Arc::new(services::ReactionService::new(
            db.reaction_repo.clone(),
            db.shoutout_repo.clone(),
        ));
        let moderation_service = Arc::new(services::ModerationService::new(
            db.shoutout_repo.clone(),
            db.comment_repo.clone(),
            db.report_repo.clone(),
            db.admin_log_repo.clone(),
            db.user_repo.clone(),
            shoutout_service.clone(),
        ));
        let stats_service = Arc::new(services::StatsService::new(
            db.user_repo.clone(),
            db.shoutout_repo.clone(),
        ));

        Self {
            config,
            db,
            auth_service,
            user_service,
            shoutout_service,
            comment_service,
            reaction_service,
            moderation_service,
            stats_service,
        }
    }
}
