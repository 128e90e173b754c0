//! Access evaluation
//!
//! Pure decision logic over a [`FeatureCatalog`]. Every function here is
//! total: unknown tiers degrade to `Free` and unknown features are denied.

use std::collections::BTreeSet;
use std::sync::Arc;

use gymrat_types::{Feature, FeatureId, Tier};
use serde::Serialize;

use crate::FeatureCatalog;

/// Whether a user tier meets a required tier
pub fn has_access(user_tier: Tier, required_tier: Tier) -> bool {
    user_tier.satisfies(required_tier)
}

/// Outcome of a single feature check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Tier unlocks the feature
    Allowed,
    /// Tier is below the feature's requirement
    UpgradeRequired {
        /// Minimum tier for the feature
        required_tier: Tier,
    },
    /// Feature is not in the catalog; nobody may use it
    UnknownFeature,
}

impl AccessDecision {
    /// Whether access is granted
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Required tier, when the feature is known
    pub fn required_tier(&self) -> Option<Tier> {
        match self {
            Self::UpgradeRequired { required_tier } => Some(*required_tier),
            Self::Allowed | Self::UnknownFeature => None,
        }
    }
}

/// What a tier unlocks
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSummary {
    pub tier: Tier,
    pub display_name: &'static str,
    pub features: Vec<Feature>,
}

/// Evaluates feature access against an injected catalog
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    catalog: Arc<FeatureCatalog>,
}

impl AccessEvaluator {
    /// Create an evaluator over a catalog
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this evaluator reads
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Decide access to a feature for a tier
    pub fn check(&self, tier: Tier, feature_id: &str) -> AccessDecision {
        match self.catalog.lookup(feature_id) {
            None => AccessDecision::UnknownFeature,
            Some(feature) if permits(tier, feature) => AccessDecision::Allowed,
            Some(feature) => AccessDecision::UpgradeRequired {
                required_tier: feature.required_tier,
            },
        }
    }

    /// Whether a tier may use a feature
    pub fn can_access_feature(&self, tier: Tier, feature_id: &str) -> bool {
        self.check(tier, feature_id).is_allowed()
    }

    /// Same as [`can_access_feature`](Self::can_access_feature) for an
    /// unvalidated tier string
    pub fn can_access_feature_raw(&self, raw_tier: &str, feature_id: &str) -> bool {
        self.can_access_feature(Tier::normalize(raw_tier), feature_id)
    }

    /// Every feature a tier unlocks
    pub fn features_for(&self, tier: Tier) -> BTreeSet<FeatureId> {
        self.unlocked(tier).map(|f| f.id.clone()).collect()
    }

    /// Minimum tier for a feature
    pub fn required_tier(&self, feature_id: &str) -> Option<Tier> {
        self.catalog.lookup(feature_id).map(|f| f.required_tier)
    }

    /// Summary of a tier for "what do I get" views
    pub fn summary(&self, tier: Tier) -> TierSummary {
        TierSummary {
            tier,
            display_name: tier.display_name(),
            features: self.unlocked(tier).cloned().collect(),
        }
    }

    fn unlocked(&self, tier: Tier) -> impl Iterator<Item = &Feature> {
        self.catalog.iter().filter(move |f| permits(tier, f))
    }
}

fn permits(tier: Tier, feature: &Feature) -> bool {
    has_access(tier, feature.required_tier)
}
