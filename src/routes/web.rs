use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to BragBoard API" }))
}

async fn health_check(State(app_state): State<AppState>) -> Json<Value> {
    let status = match app_state.db.health_check().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::error!("❌ HEALTH: Database check failed: {}", e);
            "degraded"
        }
    };

    Json(json!({
        "status": status,
        "service": "bragboard_api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": app_state.db.backend_name(),
    }))
}
