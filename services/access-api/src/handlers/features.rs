//! Catalog and tier handlers (no session required)

use axum::extract::{Path, State};
use axum::Json;
use gymrat_access_core::TierSummary;
use gymrat_types::{Feature, Tier};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeatureListResponse {
    pub features: Vec<Feature>,
}

/// GET /api/v1/features
///
/// List every gateable feature
pub async fn list_features(State(state): State<AppState>) -> Json<FeatureListResponse> {
    Json(FeatureListResponse {
        features: state.evaluator.catalog().iter().cloned().collect(),
    })
}

/// GET /api/v1/tiers/{tier}/features
///
/// What a tier unlocks; unknown tiers are shown as Free
pub async fn tier_features(
    State(state): State<AppState>,
    Path(tier): Path<String>,
) -> Json<TierSummary> {
    Json(state.evaluator.summary(Tier::normalize(&tier)))
}
