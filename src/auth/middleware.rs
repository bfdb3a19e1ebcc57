// Authentication middleware for protecting routes
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::{AppError, AppState};

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must start with 'Bearer '".to_string())
        })
}

/// Validates the bearer token and stores fresh `Claims` in the request extensions.
///
/// The role is re-read from the user store so promotions and demotions apply to
/// tokens that are already in circulation.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mut claims = app_state
        .auth_service
        .verify_token(bearer_token(request.headers())?)?;

    let user = app_state
        .user_service
        .find_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;
    claims.role = user.role;
    claims.name = user.name;

    request.extensions_mut().insert::<Claims>(claims);
    Ok(next.run(request).await)
}

/// Rejects non-admin callers. Must run after `auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !claims.is_admin() {
        tracing::warn!("🔒 AUTH: User {} attempted an admin action", claims.user_id);
        return Err(AppError::Forbidden("Admin privileges required".to_string()));
    }

    Ok(next.run(request).await)
}
