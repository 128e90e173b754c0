//! Configuration for the Access API service.

use std::path::PathBuf;
use std::time::Duration;

use gymrat_billing_core::{BillingError, PlanConfig};

/// Access API configuration
#[derive(Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Shared secret used to verify session tokens
    pub session_secret: String,
    /// Alternate feature catalog (JSON); the built-in catalog when unset
    pub feature_catalog_path: Option<PathBuf>,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
    /// Billing plan IDs and the tiers they grant
    pub plans: PlanConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Session secret (minimum 32 bytes)
        let session_secret =
            lookup("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET must be at least 32 characters",
            ));
        }

        let feature_catalog_path = lookup("FEATURE_CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let metrics_enabled = lookup("METRICS_ENABLED")
            .unwrap_or_else(|| "true".to_string())
            .parse()
            .unwrap_or(true);

        let plans = PlanConfig::from_lookup(&lookup)?;

        Ok(Self {
            http_port,
            session_secret,
            feature_catalog_path,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            plans,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("http_port", &self.http_port)
            .field("feature_catalog_path", &self.feature_catalog_path)
            .field("request_timeout", &self.request_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .field("plans", &self.plans)
            .finish_non_exhaustive()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Plans(#[from] BillingError),
}
