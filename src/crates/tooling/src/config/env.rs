//! Environment variable loading utilities
//!
//! Blank values are treated the same as unset ones, so `PORT=` in a compose
//! file leaves the configured default alone.

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a trimmed string
///
/// * `Ok(Some(value))` if the variable is set and non-blank
/// * `Ok(None)` if it is unset or blank
/// * `Err` if it contains invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => {
            let trimmed = val.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::General(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let port: Option<u16> = get_env_parse("PORT")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|e| ToolingError::invalid(key, e.to_string())),
        None => Ok(None),
    }
}

/// Replace `target` with the variable's value when it is set
///
/// Returns whether an override was applied.
pub fn override_string(target: &mut String, key: &str) -> Result<bool> {
    match get_env(key)? {
        Some(val) => {
            *target = val;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Replace `target` with the parsed value of the variable when it is set
pub fn override_parsed<T>(target: &mut T, key: &str) -> Result<bool>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_parse(key)? {
        Some(val) => {
            *target = val;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        let result = get_env("MEDBOT_TEST_MISSING_VAR_12345");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_get_env_blank_is_none() {
        env::set_var("MEDBOT_TEST_BLANK", "   ");
        assert!(get_env("MEDBOT_TEST_BLANK").unwrap().is_none());
        env::remove_var("MEDBOT_TEST_BLANK");
    }

    #[test]
    fn test_get_env_parse() {
        env::set_var("MEDBOT_TEST_NUMBER", " 42 ");
        let result: Option<u16> = get_env_parse("MEDBOT_TEST_NUMBER").unwrap();
        assert_eq!(result, Some(42));
        env::remove_var("MEDBOT_TEST_NUMBER");
    }

    #[test]
    fn test_get_env_parse_invalid() {
        env::set_var("MEDBOT_TEST_INVALID_NUMBER", "not_a_number");
        let result: Result<Option<u16>> = get_env_parse("MEDBOT_TEST_INVALID_NUMBER");
        assert!(matches!(result, Err(ToolingError::InvalidConfig { .. })));
        env::remove_var("MEDBOT_TEST_INVALID_NUMBER");
    }

    #[test]
    fn test_override_string() {
        let mut host = "http://searxng:8080".to_string();
        assert!(!override_string(&mut host, "MEDBOT_TEST_MISSING_HOST").unwrap());
        assert_eq!(host, "http://searxng:8080");

        env::set_var("MEDBOT_TEST_HOST", "http://localhost:9999");
        assert!(override_string(&mut host, "MEDBOT_TEST_HOST").unwrap());
        assert_eq!(host, "http://localhost:9999");
        env::remove_var("MEDBOT_TEST_HOST");
    }

    #[test]
    fn test_override_parsed() {
        let mut port: u16 = 8000;
        env::set_var("MEDBOT_TEST_PORT", "9000");
        assert!(override_parsed(&mut port, "MEDBOT_TEST_PORT").unwrap());
        assert_eq!(port, 9000);
        env::remove_var("MEDBOT_TEST_PORT");
    }
}
