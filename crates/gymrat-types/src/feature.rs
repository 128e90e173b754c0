//! Feature types

use serde::{Deserialize, Serialize};

use crate::Tier;

/// Feature identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub String);

impl FeatureId {
    /// Create a new feature ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::borrow::Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A capability gated behind a minimum tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Unique feature key
    pub id: FeatureId,
    /// Minimum tier that unlocks the feature
    pub required_tier: Tier,
    /// Name shown to users
    pub display_name: String,
    /// Short description shown to users
    pub description: String,
}

impl Feature {
    /// Create a feature record
    pub fn new(
        id: impl Into<String>,
        required_tier: Tier,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: FeatureId::new(id),
            required_tier,
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Well-known feature identifiers
pub mod features {
    // Free
    pub const BASIC_WORKOUTS: &str = "BASIC_WORKOUTS";
    pub const WEIGHT_TRACKING: &str = "WEIGHT_TRACKING";
    pub const COMMUNITY: &str = "COMMUNITY";

    // Pro
    pub const CUSTOM_PLANS: &str = "CUSTOM_PLANS";
    pub const AI_NUTRITION: &str = "AI_NUTRITION";
    pub const INSTRUCTOR_CHAT: &str = "INSTRUCTOR_CHAT";
    pub const FOOD_RECOMMENDATIONS: &str = "FOOD_RECOMMENDATIONS";
    pub const ADVANCED_TRACKING: &str = "ADVANCED_TRACKING";

    // Instructor
    pub const STUDENT_MANAGEMENT: &str = "STUDENT_MANAGEMENT";
    pub const UNLIMITED_PLANS: &str = "UNLIMITED_PLANS";
    pub const ADVANCED_ANALYTICS: &str = "ADVANCED_ANALYTICS";
    pub const PUBLIC_PROFILE: &str = "PUBLIC_PROFILE";
    pub const WORKOUT_ASSIGNMENT: &str = "WORKOUT_ASSIGNMENT";
}
