use std::io;

use thiserror::Error;

use super::schema::SchemaViolation;

/// Startup failures while loading a configuration. None of them are retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration file '{path}' is not valid ({} violations)", .violations.len())]
    Invalid {
        path: String,
        violations: Vec<SchemaViolation>,
    },
}

impl ConfigError {
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            ConfigError::Invalid { violations, .. } => violations,
            _ => &[],
        }
    }
}
