use crate::utils::error::{LabelError, Result};
use chrono::NaiveDate;

/// Date format printed on every label, e.g. `18/10/2026`.
pub const ELABORATION_DATE_FORMAT: &str = "%d/%m/%Y";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LabelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LabelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LabelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LabelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    for value in values {
        if !allowed.contains(&value.as_str()) {
            return Err(LabelError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }
    Ok(())
}

pub fn validate_elaboration_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, ELABORATION_DATE_FORMAT).map_err(|e| {
        LabelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected a dd/mm/yyyy date: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("nutritional.labels_per_chunk", 100, 1).is_ok());
        assert!(validate_positive_number("nutritional.labels_per_chunk", 0, 1).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_allowed_values("output.formats", &formats, &["csv", "json"]).is_ok());

        let invalid = vec!["pdf".to_string()];
        assert!(validate_allowed_values("output.formats", &invalid, &["csv", "json"]).is_err());
    }

    #[test]
    fn test_validate_elaboration_date() {
        let date = validate_elaboration_date("elaboration_date", "05/11/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 5).unwrap());
        assert!(validate_elaboration_date("elaboration_date", "2025-11-05").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.output_path", "./labels").is_ok());
        assert!(validate_path("output.output_path", "").is_err());
    }
}
