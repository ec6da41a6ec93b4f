//! Common types used throughout the Fastly API client
//!
//! This module contains shared type definitions, type aliases,
//! and constants used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Constants
// ============================================================================

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.fastly.com";

/// Header carrying the API token
pub const API_KEY_HEADER: &str = "Fastly-Key";

/// JSON:API media type
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

// ============================================================================
// Permission
// ============================================================================

/// Permission level granted by a service authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Full access to the service
    #[default]
    Full,
    /// Read-only access
    ReadOnly,
    /// Purge by surrogate key or URL only
    PurgeSelect,
    /// Purge everything
    PurgeAll,
}

impl Permission {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Full => "full",
            Permission::ReadOnly => "read_only",
            Permission::PurgeSelect => "purge_select",
            Permission::PurgeAll => "purge_all",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Permission::Full),
            "read_only" => Ok(Permission::ReadOnly),
            "purge_select" => Ok(Permission::PurgeSelect),
            "purge_all" => Ok(Permission::PurgeAll),
            other => Err(crate::Error::config(format!(
                "unknown permission '{other}' (expected full, read_only, purge_select or purge_all)"
            ))),
        }
    }
}
