//! Field limits for request payloads.
//!
//! The maxima match the column widths in `migrations/`, so an oversized or
//! NUL-bearing value is a 400 on every store instead of a database error on
//! Postgres only. Lengths count characters, as `VARCHAR(n)` does.

use serde_json::Value;

use crate::errors::AppError;

pub const USERNAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const FULL_NAME_MAX: usize = 100;
pub const PHONE_MAX: usize = 50;
/// `address`, `linkedin`, `github` and `portfolio`.
pub const LINK_MAX: usize = 255;

/// Rejects strings Postgres cannot store in TEXT or JSONB.
pub fn check_no_nul(field: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

pub fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    check_no_nul(field, value)?;
    let len = value.chars().count();
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

pub fn check_optional_text(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| check_text(field, v, max))
}

pub fn check_list(field: &str, values: &[String]) -> Result<(), AppError> {
    values.iter().try_for_each(|v| check_no_nul(field, v))
}

/// Walks a JSON value, checking object keys and string leaves.
pub fn check_json(field: &str, value: &Value) -> Result<(), AppError> {
    match value {
        Value::String(s) => check_no_nul(field, s),
        Value::Array(items) => items.iter().try_for_each(|item| check_json(field, item)),
        Value::Object(map) => map.iter().try_for_each(|(key, item)| {
            check_no_nul(field, key)?;
            check_json(field, item)
        }),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 two-byte characters still fit a 50-character column.
        assert!(check_text("username", &"é".repeat(50), USERNAME_MAX).is_ok());
        assert!(check_text("username", &"a".repeat(51), USERNAME_MAX).is_err());
    }

    #[test]
    fn test_nul_is_rejected() {
        let err = check_text("email", "ada\0@example.com", EMAIL_MAX).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("NUL")));
        assert!(check_list("skills", &["Rust".into(), "S\0L".into()]).is_err());
    }

    #[test]
    fn test_nested_json_is_scanned() {
        let clean = json!([{"degree": "BSc", "years": [2020, 2024]}]);
        assert!(check_json("education", &clean).is_ok());
        assert!(check_json("education", &json!([{"notes": ["ok", "bad\u{0}"]}])).is_err());
        assert!(check_json("education", &json!([{"ke\u{0}y": 1}])).is_err());
    }

    #[test]
    fn test_absent_optional_passes() {
        assert!(check_optional_text("phone", None, PHONE_MAX).is_ok());
        assert!(check_optional_text("phone", Some("9".repeat(51).as_str()), PHONE_MAX).is_err());
    }
}
