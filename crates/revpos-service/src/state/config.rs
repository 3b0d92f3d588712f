//! # Service Configuration
//!
//! Configuration loaded at startup, read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`REVPOS_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Store name (displayed on tickets)
    pub store_name: String,

    /// Path to the SQLite database file
    pub database_path: String,

    /// How many times a workflow retries a busy ledger before giving up
    /// with `ConcurrencyConflict`
    pub ledger_retry_attempts: u32,
}

impl Default for ServiceConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ServiceConfig {
            store_name: "Rev's American Grill".to_string(),
            database_path: "./revpos_dev.db".to_string(),
            ledger_retry_attempts: 3,
        }
    }
}

impl ServiceConfig {
    /// Creates a new ServiceConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `REVPOS_STORE_NAME`: Override store name
    /// - `REVPOS_DB_PATH`: Override database path
    /// - `REVPOS_LEDGER_RETRIES`: Override busy-retry attempts
    pub fn from_env() -> Self {
        let mut config = ServiceConfig::default();

        if let Ok(store_name) = std::env::var("REVPOS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(database_path) = std::env::var("REVPOS_DB_PATH") {
            config.database_path = database_path;
        }

        if let Ok(retries) = std::env::var("REVPOS_LEDGER_RETRIES") {
            if let Ok(attempts) = retries.parse::<u32>() {
                config.ledger_retry_attempts = attempts;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.store_name, "Rev's American Grill");
        assert_eq!(config.ledger_retry_attempts, 3);
    }
}
