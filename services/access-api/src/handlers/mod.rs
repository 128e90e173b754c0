//! HTTP handlers

mod features;
mod health;
mod me;
mod plans;

pub use features::{list_features, tier_features};
pub use health::health;
pub use me::{feature_access, my_tier, require_feature};
pub use plans::plan_tier;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
