pub mod web;
pub mod auth;
pub mod users;
pub mod shoutouts;
pub mod comments;
pub mod reactions;
pub mod admin;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth::middleware::{auth_middleware, require_admin};
use crate::AppState;

pub fn create_routes(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .merge(web::routes())
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/shoutouts", get(shoutouts::list_shoutouts))
        .route("/shoutouts/", get(shoutouts::list_shoutouts))
        .route("/shoutouts/:id", get(shoutouts::get_shoutout))
        .route("/shoutouts/:id/comments", get(comments::get_comments))
        .route("/shoutouts/:id/reactions", get(reactions::get_reactions))
        .route("/leaderboard", get(users::get_leaderboard));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::get_users))
        .route("/users/:id", get(users::get_user).put(users::update_user))
        .route("/shoutouts", post(shoutouts::create_shoutout))
        .route("/shoutouts/", post(shoutouts::create_shoutout))
        .route("/shoutouts/:id/comments", post(comments::create_comment))
        .route("/shoutouts/:id/reactions", post(reactions::toggle_reaction))
        .route("/shoutouts/:id/report", post(shoutouts::report_shoutout))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    // Layers run outermost-last, so authentication wraps the admin check
    let admin_routes = Router::new()
        .route("/admin/shoutouts/:id", delete(admin::delete_shoutout))
        .route("/admin/comments/:id", delete(admin::delete_comment))
        .route("/admin/reports", get(admin::get_pending_reports))
        .route("/admin/reports/:id/resolve", post(admin::resolve_report))
        .route("/admin/stats", get(admin::get_stats))
        .route("/admin/logs", get(admin::get_logs))
        .route("/admin/export", get(admin::export_metrics))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    public_routes
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(app_state)
}
