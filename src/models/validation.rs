use thiserror::Error;

/// Minimum accepted length for passwords submitted with create requests.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors raised while building a request, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field the server requires was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A numeric field fell outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A value not present in the fixed option list for a field.
    #[error("{value:?} is not a valid {field}")]
    UnknownOption { field: &'static str, value: String },
}

/// Trim `value` and fail with [`ValidationError::MissingField`] when nothing is left.
pub fn required(field: &'static str, value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional free-text field: blank strings become `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value)
}

pub fn one_of(
    field: &'static str,
    value: impl Into<String>,
    options: &[&str],
) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if !options.contains(&value.as_str()) {
        return Err(ValidationError::UnknownOption { field, value });
    }
    Ok(value)
}

/// Validate a password and its confirmation.
pub fn password_pair(password: &str, confirm: &str) -> Result<String, ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("Name", "  vm1 ").unwrap(), "vm1");
        assert_eq!(required("Name", "   "), Err(ValidationError::MissingField("Name")));
    }

    #[test]
    fn test_optional_drops_blank() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_password_pair() {
        assert_eq!(password_pair("secret1", "secret2"), Err(ValidationError::PasswordMismatch));
        assert_eq!(password_pair("abc", "abc"), Err(ValidationError::PasswordTooShort));
        assert_eq!(password_pair("abcdef", "abcdef").unwrap(), "abcdef");
    }

    #[test]
    fn test_one_of_rejects_unknown() {
        let err = one_of("disk format", "exe", &["raw", "qcow2"]).unwrap_err();
        assert_eq!(err.to_string(), "\"exe\" is not a valid disk format");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = in_range("Size", 0, 1, 10_000).unwrap_err();
        assert_eq!(err.to_string(), "Size must be between 1 and 10000");
    }
}
