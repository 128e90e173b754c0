//! Billing plan handlers

use axum::extract::{Path, State};
use axum::Json;
use gymrat_types::Tier;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTierResponse {
    pub plan_id: String,
    pub tier: Tier,
    pub display_name: &'static str,
}

/// GET /api/v1/plans/{plan_id}/tier
///
/// Tier a billing plan grants; unconfigured plans grant Free
pub async fn plan_tier(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Json<PlanTierResponse> {
    let tier = state.plans.tier_from_plan_id(&plan_id);
    Json(PlanTierResponse {
        plan_id,
        tier,
        display_name: tier.display_name(),
    })
}
