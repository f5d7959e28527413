//! Database configuration.

use std::time::Duration;

/// Connection pool settings for the SQLite database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL, e.g. `sqlite:task_tracker.db?mode=rwc`
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Timeout when acquiring a connection from the pool
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:task_tracker.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// Build configuration from the environment, falling back to
    /// defaults for anything unset.
    ///
    /// * `DATABASE_URL` - connection string
    /// * `DATABASE_MAX_CONNECTIONS` - pool size
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            acquire_timeout: defaults.acquire_timeout,
        }
    }

    /// In-memory database for tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Whether this URL points at an in-memory database.
    ///
    /// Matters for pool sizing: each `:memory:` connection is its own
    /// database, so pooling more than one would split state.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_file_backed() {
        let config = DatabaseConfig::default();
        assert!(!config.is_in_memory());
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn in_memory_is_detected() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
    }
}
