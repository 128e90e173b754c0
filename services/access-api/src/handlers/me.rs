//! Handlers for the signed-in caller

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use gymrat_access_core::TierSummary;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::Gate;

#[derive(Debug, Serialize)]
pub struct FeatureAccessResponse {
    pub feature: String,
    pub allowed: bool,
}

/// GET /api/v1/me/tier
///
/// Caller's tier and unlocked features; Free when signed out
pub async fn my_tier(gate: Gate) -> Json<TierSummary> {
    let tier = gate.current_tier().await;
    Json(gate.evaluator().summary(tier))
}

/// GET /api/v1/me/features/{feature_id}
///
/// Soft check, always 200
pub async fn feature_access(
    gate: Gate,
    Path(feature_id): Path<String>,
) -> Json<FeatureAccessResponse> {
    let allowed = gate.has_feature_access(&feature_id).await;
    Json(FeatureAccessResponse {
        feature: feature_id,
        allowed,
    })
}

/// GET /api/v1/gate/{feature_id}
///
/// Hard gate: 204 when allowed, 401 signed out, 403 upgrade required
pub async fn require_feature(gate: Gate, Path(feature_id): Path<String>) -> ApiResult<StatusCode> {
    gate.require_feature(&feature_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
