//! Input validation for auth and trade forms.

use thiserror::Error;

use crate::error::SdkError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A rejected input value, with a message ready for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ValidationError> for SdkError {
    fn from(e: ValidationError) -> Self {
        SdkError::Validation(e.message)
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Rejects missing and empty values. Whitespace-only strings pass.
pub fn validate_required(value: Option<&str>, field_name: &str) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ValidationError::new(format!("{} is required", field_name))),
    }
}

/// Parse a numeric form field and check optional inclusive bounds.
pub fn validate_number(
    value: &str,
    field_name: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, ValidationError> {
    let num = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            ValidationError::new(format!("{} must be a valid number", field_name))
        })?;

    if let Some(min) = min {
        if num < min {
            return Err(ValidationError::new(format!(
                "{} must be at least {}",
                field_name, min
            )));
        }
    }
    if let Some(max) = max {
        if num > max {
            return Err(ValidationError::new(format!(
                "{} must be at most {}",
                field_name, max
            )));
        }
    }
    Ok(num)
}
