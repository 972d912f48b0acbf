//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present,
/// so bare `$VAR` text passes through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DAGHER_TEST_LABEL_SET", "Platforms");
        }
        let result = expand_env("${DAGHER_TEST_LABEL_SET:-Sections}", "tab_group.title").unwrap();
        assert_eq!(result, "Platforms");
        unsafe {
            std::env::remove_var("DAGHER_TEST_LABEL_SET");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DAGHER_TEST_LABEL_UNSET");
        }
        let result = expand_env("${DAGHER_TEST_LABEL_UNSET:-Sections}", "tab_group.title").unwrap();
        assert_eq!(result, "Sections");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DAGHER_TEST_MISSING");
        }
        let err = expand_env("${DAGHER_TEST_MISSING}", "tab_group.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DAGHER_TEST_MISSING"));
        assert!(err.to_string().contains("tab_group.title"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DAGHER_TEST_PRODUCT", "Dagher");
        }
        let result = expand_env("${DAGHER_TEST_PRODUCT} install options", "tab_group.title").unwrap();
        assert_eq!(result, "Dagher install options");
        unsafe {
            std::env::remove_var("DAGHER_TEST_PRODUCT");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("Price in $USD", "tab_group.title").unwrap();
        assert_eq!(result, "Price in $USD");
    }
}
