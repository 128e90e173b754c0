//! Plan ID to tier resolution

use gymrat_types::Tier;
use tracing::warn;

use crate::PlanConfig;

/// Resolves payment-provider plan IDs to tiers.
///
/// Resolution order: the Pro slot, the Instructor slot, the generic plan
/// table, then `Free`. An unknown plan never grants a paid tier.
#[derive(Debug, Clone)]
pub struct PlanTierMapper {
    config: PlanConfig,
}

impl PlanTierMapper {
    /// Create a mapper over a plan configuration
    pub fn new(config: PlanConfig) -> Self {
        if config.pro_plan_id.is_some() && config.pro_plan_id == config.instructor_plan_id {
            warn!("Pro and Instructor plan IDs are identical; the plan will resolve to Pro");
        }
        Self { config }
    }

    /// Tier granted by a plan ID
    pub fn tier_from_plan_id(&self, plan_id: &str) -> Tier {
        if plan_id.is_empty() {
            return Tier::Free;
        }

        if self.config.pro_plan_id.as_deref() == Some(plan_id) {
            return Tier::Pro;
        }
        if self.config.instructor_plan_id.as_deref() == Some(plan_id) {
            return Tier::Instructor;
        }
        if let Some(tier) = self.config.plan_tiers.get(plan_id) {
            return *tier;
        }

        warn!(plan_id, "Unknown billing plan, resolving to free tier");
        Tier::Free
    }

    /// The configuration this mapper reads
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }
}
