//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;
use task_tracker::db::DatabaseConfig;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Security configuration
    pub security: SecurityConfig,
}

/// Security-related configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Access-token signing secret (required)
    pub access_token_secret: String,
    /// Refresh-token signing secret (required)
    pub refresh_token_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid.
    /// Both token secrets are required: starting without them would
    /// either leave the server unable to verify anything, or tempt a
    /// silent fallback that invalidates all sessions on restart.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        // Bind address
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:7000"
                    .parse()
                    .expect("Default bind address is valid")
            });

        // Database configuration
        let mut database = DatabaseConfig::from_env();
        if let Some(url) = database_url_override {
            database.url = url;
        }

        // Security configuration (REQUIRED)
        let access_token_secret =
            std::env::var("ACCESS_TOKEN_SECRET").map_err(|_| ConfigError::MissingRequired {
                var: "ACCESS_TOKEN_SECRET".to_string(),
                hint: "Generate with: openssl rand -hex 32".to_string(),
            })?;

        let refresh_token_secret =
            std::env::var("REFRESH_TOKEN_SECRET").map_err(|_| ConfigError::MissingRequired {
                var: "REFRESH_TOKEN_SECRET".to_string(),
                hint: "Generate with: openssl rand -hex 32".to_string(),
            })?;

        // Validate security params
        if access_token_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                var: "ACCESS_TOKEN_SECRET".to_string(),
                reason: "Must be at least 32 characters (128-bit security)".to_string(),
            });
        }

        if refresh_token_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                var: "REFRESH_TOKEN_SECRET".to_string(),
                reason: "Must be at least 32 characters (128-bit security)".to_string(),
            });
        }

        if access_token_secret == refresh_token_secret {
            return Err(ConfigError::Invalid {
                var: "REFRESH_TOKEN_SECRET".to_string(),
                reason: "Must differ from ACCESS_TOKEN_SECRET".to_string(),
            });
        }

        let security = SecurityConfig {
            access_token_secret,
            refresh_token_secret,
        };

        Ok(ServerConfig {
            bind,
            database,
            security,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "ACCESS_TOKEN_SECRET".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ACCESS_TOKEN_SECRET"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_invalid_error_display() {
        let err = ConfigError::Invalid {
            var: "REFRESH_TOKEN_SECRET".to_string(),
            reason: "Must be at least 32 characters".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("REFRESH_TOKEN_SECRET"));
        assert!(msg.contains("at least 32"));
    }
}
