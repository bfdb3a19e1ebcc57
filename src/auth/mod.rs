pub mod jwt;
pub mod middleware;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::models::{User, UserRole};
use crate::{AppError, Result};
use jwt::JwtService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub name: String,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize, // Expiration time
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

pub struct AuthService {
    jwt: JwtService,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(jwt_secret: &str, expiry_hours: i64) -> Self {
        Self {
            jwt: JwtService::new(jwt_secret),
            token_ttl: Duration::hours(expiry_hours),
        }
    }

    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp() as usize,
        };
        self.jwt.encode_token(&claims)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.jwt.decode_token(token)
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
