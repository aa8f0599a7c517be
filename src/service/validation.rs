//! Payload validation. Runs before any store access; violations are 422.

use crate::error::AppError;

/// Implemented by every request payload accepted through `ValidJson`.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub struct RequestValidator;

impl RequestValidator {
    /// Text field bounded by character count.
    pub fn text(field: &str, value: &str, min_length: usize, max_length: Option<usize>) -> Result<(), AppError> {
        let len = value.chars().count();
        if len < min_length {
            return Err(if min_length == 1 {
                AppError::Validation(format!("{} must not be empty", field))
            } else {
                AppError::Validation(format!("{} must be at least {} characters", field, min_length))
            });
        }
        if let Some(max) = max_length {
            if len > max {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    field, max
                )));
            }
        }
        Ok(())
    }

    /// `local@domain.tld` with no whitespace.
    pub fn email(field: &str, value: &str) -> Result<(), AppError> {
        let invalid = || AppError::Validation(format!("{} must be a valid email", field));
        if value.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
            _ => Err(invalid()),
        }
    }

    pub fn minimum(field: &str, value: i32, min: i32) -> Result<(), AppError> {
        if value < min {
            return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
        }
        Ok(())
    }
}
