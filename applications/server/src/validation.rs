/// Request payload validation
use crate::error::ServerError;
use chrono::Datelike;
use songbook_core::SongbookError;

/// Checked after a payload deserializes and before it reaches a handler
pub trait Validate {
    fn validate(&self) -> Result<(), ServerError>;
}

fn invalid(message: String) -> ServerError {
    SongbookError::invalid_input(message).into()
}

/// Fail when a required string field is blank
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ServerError> {
    if value.trim().is_empty() {
        return Err(invalid(format!(
            "\"{}\" is not allowed to be empty",
            field
        )));
    }
    Ok(())
}

/// Fail unless `year` lies in 1900..=current year
pub fn require_year(field: &str, year: i32) -> Result<(), ServerError> {
    let current = chrono::Utc::now().year();
    if !(1900..=current).contains(&year) {
        return Err(invalid(format!(
            "\"{}\" must be between 1900 and {}",
            field, current
        )));
    }
    Ok(())
}

/// Fail when an optional count is negative
pub fn require_non_negative(field: &str, value: Option<i32>) -> Result<(), ServerError> {
    match value {
        Some(v) if v < 0 => Err(invalid(format!(
            "\"{}\" must be greater than or equal to 0",
            field
        ))),
        _ => Ok(()),
    }
}

/// Minimal shape check for an e-mail address
pub fn require_email(field: &str, value: &str) -> Result<(), ServerError> {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });

    if !valid {
        return Err(invalid(format!(
            "\"{}\" must be a valid email",
            field
        )));
    }
    Ok(())
}
