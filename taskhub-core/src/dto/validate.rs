//! Field checks shared by the request DTOs

use crate::error::ValidationError;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required(field, value)?;
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::new(field, "must be a valid email address")),
    }
}

pub(crate) fn password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

pub(crate) fn optional_required(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => required(field, v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(email("email", "jane@example.com").is_ok());
        assert!(email("email", " jane@example.com ").is_ok());
        assert!(email("email", "jane").is_err());
        assert!(email("email", "@example.com").is_err());
        assert!(email("email", "jane@localhost").is_err());
        assert!(email("email", "").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(password("password", "secret").is_ok());
        assert!(password("password", "short").is_err());
    }

    #[test]
    fn test_optional_required() {
        assert!(optional_required("name", None).is_ok());
        assert!(optional_required("name", Some("x")).is_ok());
        assert!(optional_required("name", Some("  ")).is_err());
    }
}
