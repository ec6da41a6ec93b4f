//! Error types for the Fastly API client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Fastly API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Input Validation Errors
    // ============================================================================
    #[error("Missing required field 'ID'")]
    MissingId,

    #[error("Missing required field 'ServiceID'")]
    MissingServiceId,

    #[error("Missing required field 'ServiceVersion'")]
    MissingServiceVersion,

    #[error("Missing required field 'WAFID'")]
    MissingWafId,

    #[error("Missing required field 'OWASPID'")]
    MissingOwaspId,

    #[error("Missing required field 'RuleID'")]
    MissingRuleId,

    #[error("Missing required field 'Permissions'")]
    MissingPermissions,

    #[error("Missing required field 'Name'")]
    MissingName,

    #[error("Missing required field 'Service' (service authorization)")]
    MissingAuthorizationService,

    #[error("Missing required field 'User' (service authorization)")]
    MissingAuthorizationUser,

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Expected status 'ok', got '{status}'")]
    NotOk { status: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Unexpected resource type: expected '{expected}', got '{found}'")]
    UnexpectedResourceType { expected: String, found: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Invalid pagination link '{link}': {message}")]
    PaginationLink { link: String, message: String },

    #[error("No page can follow page {after}")]
    PageOutOfRange { after: u32 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unexpected resource type error
    pub fn unexpected_type(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedResourceType {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a pagination link error
    pub fn pagination_link(link: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PaginationLink {
            link: link.into(),
            message: message.into(),
        }
    }

    /// True for errors raised by local input validation, before any I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingId
                | Error::MissingServiceId
                | Error::MissingServiceVersion
                | Error::MissingWafId
                | Error::MissingOwaspId
                | Error::MissingRuleId
                | Error::MissingPermissions
                | Error::MissingName
                | Error::MissingAuthorizationService
                | Error::MissingAuthorizationUser
        )
    }

    /// HTTP status code, if this error came from a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the Fastly API client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::unexpected_type("waf", "rule");
        assert_eq!(
            err.to_string(),
            "Unexpected resource type: expected 'waf', got 'rule'"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::MissingId.is_validation());
        assert!(Error::MissingServiceVersion.is_validation());
        assert!(Error::MissingAuthorizationUser.is_validation());

        assert!(!Error::http_status(400, "").is_validation());
        assert!(!Error::decode("bad").is_validation());
        assert!(!Error::config("test").is_validation());
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(503, "").status(), Some(503));
        assert_eq!(Error::MissingName.status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
