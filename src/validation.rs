//! Request validation module
//!
//! Provides validation utilities for JSON request payloads.

use crate::error::ApiError;

/// Validates the title of a bug being created
///
/// The title must be present and non-empty; status and priority are
/// free-form and never validated.
pub fn require_title(title: Option<&str>) -> Result<&str, ApiError> {
    match title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(ApiError::bad_request("Title is required")),
    }
}

/// Validates the credential pair of a registration request
///
/// Both fields must be present and non-empty.
pub fn require_credentials<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ApiError> {
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(ApiError::bad_request("Username and password are required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_title_present() {
        assert_eq!(require_title(Some("Crash on save")).unwrap(), "Crash on save");
    }

    #[test]
    fn test_require_title_rejected() {
        assert!(require_title(None).is_err());
        assert!(require_title(Some("")).is_err());
    }

    #[test]
    fn test_require_title_error_message() {
        let err = require_title(None).unwrap_err();
        match err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Title is required"),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[test]
    fn test_require_credentials_present() {
        let (username, password) = require_credentials(Some("alice"), Some("hunter2")).unwrap();
        assert_eq!(username, "alice");
        assert_eq!(password, "hunter2");
    }

    #[test]
    fn test_require_credentials_rejected() {
        assert!(require_credentials(None, Some("hunter2")).is_err());
        assert!(require_credentials(Some("alice"), None).is_err());
        assert!(require_credentials(None, None).is_err());
        assert!(require_credentials(Some(""), Some("hunter2")).is_err());
        assert!(require_credentials(Some("alice"), Some("")).is_err());
    }
}
