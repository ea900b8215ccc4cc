//! Server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Which collection `DELETE /notes` resolves the id against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteLookup {
    /// Look the id up among notes and delete the note.
    #[default]
    Notes,
    /// Legacy behaviour: look the id up among users and delete the user.
    /// Kept only so deployments that relied on it can opt back in.
    Users,
}

impl FromStr for DeleteLookup {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notes" => Ok(Self::Notes),
            "users" => Ok(Self::Users),
            other => Err(ConfigError::InvalidValue {
                name: "DELETE_LOOKUP".to_string(),
                reason: format!("expected 'notes' or 'users', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for DeleteLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notes => write!(f, "notes"),
            Self::Users => write!(f, "users"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Collection the delete endpoint resolves ids against.
    pub delete_lookup: DeleteLookup,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 3000,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            request_timeout_secs: 30,
            delete_lookup: DeleteLookup::Notes,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `DATABASE_URL`: Database connection string (default: in-memory store)
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `REQUEST_TIMEOUT_SECS`: Request timeout (default: 30)
    /// - `DELETE_LOOKUP`: `notes` or `users` (default: "notes")
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                reason: format!("'{}' is not a number of seconds", raw),
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        let delete_lookup = match env::var("DELETE_LOOKUP") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.delete_lookup,
        };

        Ok(Self {
            database_url,
            port,
            log_level,
            cors_allowed_origins,
            request_timeout_secs,
            delete_lookup,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
