//! Access errors

use gymrat_types::{FeatureId, Tier};
use thiserror::Error;

/// Errors raised by the hard feature gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No authenticated session
    #[error("unauthorized")]
    Unauthorized,

    /// Session present but the tier does not unlock the feature
    #[error("{}", upgrade_message(.feature, .required_tier))]
    UpgradeRequired {
        /// Requested feature
        feature: FeatureId,
        /// Minimum tier, `None` when the feature is not in the catalog
        required_tier: Option<Tier>,
    },

    /// The session collaborator failed
    #[error("session unavailable: {0}")]
    SessionUnavailable(String),
}

fn upgrade_message(feature: &FeatureId, required_tier: &Option<Tier>) -> String {
    match required_tier {
        Some(tier) => format!("feature '{feature}' requires the {} plan", tier.display_name()),
        None => format!("feature '{feature}' is not available on any plan"),
    }
}

impl AccessError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::UpgradeRequired { .. } => 403,
            Self::SessionUnavailable(_) => 503,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UpgradeRequired { .. } => "UPGRADE_REQUIRED",
            Self::SessionUnavailable(_) => "SESSION_UNAVAILABLE",
        }
    }
}

impl From<SessionError> for AccessError {
    fn from(err: SessionError) -> Self {
        Self::SessionUnavailable(err.to_string())
    }
}

/// Session resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Token is malformed or its signature does not match
    #[error("invalid session token")]
    InvalidToken,

    /// Token has expired
    #[error("session expired")]
    Expired,

    /// Signing secret is unusable
    #[error("session secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort {
        /// Provided length
        actual: usize,
        /// Required length
        minimum: usize,
    },

    /// The session backend could not be reached
    #[error("session backend error: {0}")]
    Backend(String),

    /// Session payload could not be encoded
    #[error("session encoding error: {0}")]
    Encoding(String),
}

/// Feature catalog construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A feature has an empty identifier
    #[error("feature id must not be empty")]
    EmptyId,

    /// Two features share an identifier
    #[error("duplicate feature id: {0}")]
    DuplicateId(String),

    /// Catalog JSON could not be parsed
    #[error("invalid catalog: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
