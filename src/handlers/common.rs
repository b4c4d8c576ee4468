use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to `(limit, offset)` usable by the stores
    pub fn resolve(&self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100) as u64;
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        (limit, offset)
    }
}

/// Reject blank values and values longer than `max_len` characters once trimmed
pub fn validate_required(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Same as [`validate_required`] when a value is present
pub fn validate_optional(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(value) => validate_required(value, field, max_len),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_is_clamped() {
        let params = PaginationParams {
            limit: Some(1000),
            offset: Some(-5),
        };
        assert_eq!(params.resolve(), (100, 0));

        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.resolve(), (20, 0));
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Socks", "Name", 100).is_ok());
        assert!(validate_required("   ", "Name", 100).is_err());
        assert!(validate_required(&"x".repeat(101), "Name", 100).is_err());
        assert!(validate_optional(&None, "Name", 100).is_ok());
        assert!(validate_optional(&Some(String::new()), "Name", 100).is_err());
    }

    #[test]
    fn test_validate_required_measures_trimmed_value() {
        let padded = format!("  {}  ", "x".repeat(100));
        assert!(validate_required(&padded, "Name", 100).is_ok());

        let padded = format!(" {} ", "x".repeat(101));
        assert!(validate_required(&padded, "Name", 100).is_err());
    }
}
