use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::validation::{normalize_email, required_text, MAX_NAME_LEN};
use crate::{AppError, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Employee,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "employee",
            UserRole::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "employee" => Ok(UserRole::Employee),
            "admin" => Ok(UserRole::Admin),
            other => Err(AppError::DatabaseError(format!("Unknown role '{}' in stored user", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String, // Stored lowercased, unique
    pub department: String,
    pub role: UserRole,
    pub password_hash: String,
    pub joined_at: DateTime<Utc>,
}

/// A user row before the store has assigned an id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: UserRole,
    pub password_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
}

impl CreateUserRequest {
    /// Returns the trimmed `(name, email, department)` triple once every field passes.
    pub fn validate(&self) -> Result<(String, String, String)> {
        let name = required_text("name", &self.name, MAX_NAME_LEN)?;
        let email = normalize_email(&self.email)?;
        let department = required_text("department", &self.department, MAX_NAME_LEN)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        Ok((name, email, department))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: UserRole,
    pub joined_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            department: user.department,
            role: user.role,
            joined_at: user.joined_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}
