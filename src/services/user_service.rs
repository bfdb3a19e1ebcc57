use std::sync::Arc;

use crate::auth::{AuthService, Claims};
use crate::db::repository::UserRepository;
use crate::models::user::{CreateUserRequest, NewUser, UpdateUserRequest, UserResponse};
use crate::models::validation::{normalize_email, required_text, MAX_NAME_LEN};
use crate::models::{User, UserRole};
use crate::{AppError, Result};

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        self.user_repo.get_user_by_id(user_id).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse> {
        self.find_user(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>> {
        let users = self.user_repo.list_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Creates an account with the given role. Public registration always passes
    /// `UserRole::Employee`; admins only come from seeding or a role update.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
        role: UserRole,
        auth_service: &AuthService,
    ) -> Result<User> {
        let (name, email, department) = request.validate()?;

        if self.user_repo.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!("Email {} is already registered", email)));
        }

        // Hash the password before storing
        let password_hash = auth_service.hash_password(&request.password)?;

        let user = self
            .user_repo
            .create_user(&NewUser {
                name,
                email,
                department,
                role,
                password_hash,
            })
            .await?;

        tracing::info!("👤 Registered user {} ({}) as {}", user.id, user.email, user.role);
        Ok(user)
    }

    pub async fn register(
        &self,
        request: CreateUserRequest,
        auth_service: &AuthService,
    ) -> Result<(UserResponse, String)> {
        let user = self.create_user(request, UserRole::Employee, auth_service).await?;
        let token = auth_service.generate_token(&user)?;
        Ok((UserResponse::from(user), token))
    }

    pub async fn authenticate_user(
        &self,
        email: &str,
        password: &str,
        auth_service: &AuthService,
    ) -> Result<(UserResponse, String)> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let email = normalize_email(email).map_err(|_| invalid())?;
        let user = self.user_repo.get_user_by_email(&email).await?.ok_or_else(invalid)?;

        if !auth_service.verify_password(password, &user.password_hash)? {
            tracing::warn!("🔒 AUTH: Failed login for {}", email);
            return Err(invalid());
        }

        let token = auth_service.generate_token(&user)?;
        tracing::info!("🔓 AUTH: User {} logged in", user.id);
        Ok((UserResponse::from(user), token))
    }

    /// Profile update. Users may edit themselves; admins may edit anyone and are
    /// the only ones allowed to change a role.
    pub async fn update_user(
        &self,
        actor: &Claims,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse> {
        if actor.user_id != user_id && !actor.is_admin() {
            return Err(AppError::Forbidden("You can only edit your own profile".to_string()));
        }

        let mut user = self
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if let Some(name) = &request.name {
            user.name = required_text("name", name, MAX_NAME_LEN)?;
        }
        if let Some(department) = &request.department {
            user.department = required_text("department", department, MAX_NAME_LEN)?;
        }
        if let Some(role) = request.role {
            if role != user.role {
                if !actor.is_admin() {
                    return Err(AppError::Forbidden("Only admins can change roles".to_string()));
                }
                user.role = role;
            }
        }

        let updated = self.user_repo.update_user(&user).await?;
        tracing::info!("👤 User {} updated by {}", updated.id, actor.user_id);
        Ok(UserResponse::from(updated))
    }
}
