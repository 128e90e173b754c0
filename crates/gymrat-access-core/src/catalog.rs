//! Feature catalog
//!
//! The catalog is built once at startup and shared read-only through an
//! `Arc`. Nothing in this crate holds a global catalog; callers construct
//! one (usually [`FeatureCatalog::standard`]) and hand it to the
//! [`AccessEvaluator`](crate::AccessEvaluator).

use std::collections::BTreeMap;

use gymrat_types::{features, Feature, FeatureId, Tier};

use crate::CatalogError;

/// Immutable registry of every gateable feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCatalog {
    features: BTreeMap<FeatureId, Feature>,
}

impl FeatureCatalog {
    /// Build a catalog, rejecting empty or duplicate identifiers
    pub fn from_features(
        features: impl IntoIterator<Item = Feature>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for feature in features {
            if feature.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if map.contains_key(&feature.id) {
                return Err(CatalogError::DuplicateId(feature.id.to_string()));
            }
            map.insert(feature.id.clone(), feature);
        }
        Ok(Self { features: map })
    }

    /// Load a catalog from a JSON array of features
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let features: Vec<Feature> = serde_json::from_str(json)?;
        Self::from_features(features)
    }

    /// The catalog shipped with the application
    pub fn standard() -> Self {
        let features = [
            (
                features::BASIC_WORKOUTS,
                Tier::Free,
                "Basic workouts",
                "Create, edit and log your own workouts",
            ),
            (
                features::WEIGHT_TRACKING,
                Tier::Free,
                "Weight tracking",
                "Record body weight over time",
            ),
            (features::COMMUNITY, Tier::Free, "Community", "Join the community feed"),
            (
                features::CUSTOM_PLANS,
                Tier::Pro,
                "Custom plans",
                "Build personalised training plans",
            ),
            (features::AI_NUTRITION, Tier::Pro, "AI nutrition", "AI-assisted nutrition plans"),
            (features::INSTRUCTOR_CHAT, Tier::Pro, "Instructor chat", "Chat with your instructor"),
            (
                features::FOOD_RECOMMENDATIONS,
                Tier::Pro,
                "Food recommendations",
                "Meal and food suggestions",
            ),
            (
                features::ADVANCED_TRACKING,
                Tier::Pro,
                "Advanced tracking",
                "Detailed progress tracking",
            ),
            (
                features::STUDENT_MANAGEMENT,
                Tier::Instructor,
                "Student management",
                "Manage your students",
            ),
            (
                features::UNLIMITED_PLANS,
                Tier::Instructor,
                "Unlimited plans",
                "Create as many plans as you need",
            ),
            (
                features::ADVANCED_ANALYTICS,
                Tier::Instructor,
                "Advanced analytics",
                "Analytics across all students",
            ),
            (
                features::PUBLIC_PROFILE,
                Tier::Instructor,
                "Public profile",
                "Public instructor profile page",
            ),
            (
                features::WORKOUT_ASSIGNMENT,
                Tier::Instructor,
                "Workout assignment",
                "Assign workouts to students",
            ),
        ];

        let features = features
            .into_iter()
            .map(|(id, tier, name, description)| {
                (FeatureId::new(id), Feature::new(id, tier, name, description))
            })
            .collect();

        Self { features }
    }

    /// Look up a feature by ID
    pub fn lookup(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Whether the catalog defines a feature
    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    /// Iterate features in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_tiers() {
        let catalog = FeatureCatalog::standard();
        assert_eq!(catalog.len(), 13);

        let tier = |id: &str| catalog.lookup(id).map(|f| f.required_tier);
        assert_eq!(tier(features::BASIC_WORKOUTS), Some(Tier::Free));
        assert_eq!(tier(features::WEIGHT_TRACKING), Some(Tier::Free));
        assert_eq!(tier(features::AI_NUTRITION), Some(Tier::Pro));
        assert_eq!(tier(features::INSTRUCTOR_CHAT), Some(Tier::Pro));
        assert_eq!(tier(features::STUDENT_MANAGEMENT), Some(Tier::Instructor));
        assert_eq!(tier(features::WORKOUT_ASSIGNMENT), Some(Tier::Instructor));
        assert_eq!(tier("NOT_A_REAL_FEATURE"), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = FeatureCatalog::from_features([
            Feature::new("A", Tier::Free, "A", ""),
            Feature::new("A", Tier::Pro, "A again", ""),
        ]);
        assert_eq!(result, Err(CatalogError::DuplicateId("A".to_string())));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = FeatureCatalog::from_features([Feature::new("  ", Tier::Free, "", "")]);
        assert_eq!(result, Err(CatalogError::EmptyId));
    }

    #[test]
    fn test_from_json() {
        let catalog = FeatureCatalog::from_json(
            r#"[
                {"id": "MEAL_PLANS", "requiredTier": "PRO", "displayName": "Meal plans", "description": "Weekly meal plans"},
                {"id": "CHAT", "requiredTier": "FREE", "displayName": "Chat", "description": ""}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("MEAL_PLANS").unwrap().required_tier, Tier::Pro);
        let ids: Vec<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["CHAT", "MEAL_PLANS"]);
    }

    #[test]
    fn test_from_json_rejects_unknown_tier() {
        let result = FeatureCatalog::from_json(
            r#"[{"id": "X", "requiredTier": "GOLD", "displayName": "X", "description": ""}]"#,
        );
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
