// Shared input checks for request bodies
use crate::{AppError, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_MESSAGE_LEN: usize = 2000;
pub const MAX_COMMENT_LEN: usize = 1000;
pub const MAX_REASON_LEN: usize = 500;

/// Trims `value` and rejects it when empty or longer than `max_len` characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::ValidationError(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}

pub fn normalize_email(value: &str) -> Result<String> {
    let email = value.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(AppError::ValidationError("email must be a valid address".to_string()));
    }
    Ok(email)
}

pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim).filter(|url| !url.is_empty()) {
        None => Ok(None),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(Some(url.to_string()))
        }
        Some(_) => Err(AppError::ValidationError(format!(
            "{} must be an http(s) URL",
            field
        ))),
    }
}
