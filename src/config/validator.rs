//! Configuration validation rules.
//!
//! - The file extension must be a bare extension (`html`, not `.html`)
//! - The default expiration must be a valid expression

use crate::config::schema::CacheConfig;
use crate::duration::parse_expiration;
use crate::error::{CacheError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field the rule applies to
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &CacheConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let ext = &config.file_extension;
    if ext.is_empty() {
        errors.push(ValidationError {
            field: "file_extension".to_string(),
            message: "file_extension must not be empty".to_string(),
        });
    } else if ext.starts_with('.') || ext.contains(['/', '\\']) {
        errors.push(ValidationError {
            field: "file_extension".to_string(),
            message: format!(
                "file_extension '{}' must be a bare extension such as 'html'",
                ext
            ),
        });
    }

    let expiration = &config.default_expiration;
    if expiration.trim().is_empty() {
        errors.push(ValidationError {
            field: "default_expiration".to_string(),
            message: "default_expiration must not be empty".to_string(),
        });
    } else if let Err(e) = parse_expiration(Some(expiration.as_str()), expiration) {
        errors.push(ValidationError {
            field: "default_expiration".to_string(),
            message: e.to_string(),
        });
    }

    errors
}

/// Validate a configuration, failing with all messages joined.
pub fn validate(config: &CacheConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(CacheError::ConfigValidation {
            message: messages.join("; "),
        })
    }
}
