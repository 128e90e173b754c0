//! Billing plan configuration

use std::collections::HashMap;

use gymrat_types::Tier;

use crate::BillingError;

/// Plan identifiers configured for the payment provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanConfig {
    /// Plan ID that grants `Pro`
    pub pro_plan_id: Option<String>,
    /// Plan ID that grants `Instructor`
    pub instructor_plan_id: Option<String>,
    /// Additional plan IDs (legacy, annual, regional) and their tiers
    pub plan_tiers: HashMap<String, Tier>,
}

impl PlanConfig {
    /// Create an empty config; every plan resolves to `Free`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Pro plan ID
    pub fn with_pro_plan(mut self, plan_id: impl Into<String>) -> Self {
        self.pro_plan_id = non_empty(plan_id.into());
        self
    }

    /// Set the Instructor plan ID
    pub fn with_instructor_plan(mut self, plan_id: impl Into<String>) -> Self {
        self.instructor_plan_id = non_empty(plan_id.into());
        self
    }

    /// Add a plan to the generic table
    pub fn with_plan(mut self, plan_id: impl Into<String>, tier: Tier) -> Self {
        if let Some(plan_id) = non_empty(plan_id.into()) {
            self.plan_tiers.insert(plan_id, tier);
        }
        self
    }

    /// Load configuration from environment variables
    ///
    /// - `PAYPAL_PRO_PLAN_ID`
    /// - `PAYPAL_INSTRUCTOR_PLAN_ID`
    /// - `PAYPAL_PLAN_TIERS` as `plan=TIER,plan=TIER`
    pub fn from_env() -> Result<Self, BillingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BillingError> {
        let mut config = Self::new();

        if let Some(plan_id) = lookup("PAYPAL_PRO_PLAN_ID") {
            config = config.with_pro_plan(plan_id);
        }
        if let Some(plan_id) = lookup("PAYPAL_INSTRUCTOR_PLAN_ID") {
            config = config.with_instructor_plan(plan_id);
        }
        if let Some(table) = lookup("PAYPAL_PLAN_TIERS") {
            for (plan_id, tier) in parse_plan_table(&table)? {
                config = config.with_plan(plan_id, tier);
            }
        }

        Ok(config)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_plan_table(table: &str) -> Result<Vec<(String, Tier)>, BillingError> {
    table
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (plan_id, tier) = entry.split_once('=').ok_or_else(|| {
                BillingError::InvalidConfig(format!("expected plan=TIER, got '{entry}'"))
            })?;
            let tier = Tier::parse_config(tier)
                .map_err(|e| BillingError::InvalidConfig(format!("{e} for plan '{plan_id}'")))?;
            Ok((plan_id.trim().to_string(), tier))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let config = PlanConfig::from_lookup(lookup(&[
            ("PAYPAL_PRO_PLAN_ID", "P-PRO"),
            ("PAYPAL_INSTRUCTOR_PLAN_ID", "P-INS"),
            ("PAYPAL_PLAN_TIERS", "P-PRO-YEAR=PRO, P-INS-YEAR=instructor"),
        ]))
        .unwrap();

        assert_eq!(config.pro_plan_id.as_deref(), Some("P-PRO"));
        assert_eq!(config.instructor_plan_id.as_deref(), Some("P-INS"));
        assert_eq!(config.plan_tiers.get("P-PRO-YEAR"), Some(&Tier::Pro));
        assert_eq!(config.plan_tiers.get("P-INS-YEAR"), Some(&Tier::Instructor));
    }

    #[test]
    fn test_missing_vars_give_empty_config() {
        let config = PlanConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PlanConfig::new());
    }

    #[test]
    fn test_blank_slots_are_unset() {
        let config = PlanConfig::from_lookup(lookup(&[
            ("PAYPAL_PRO_PLAN_ID", ""),
            ("PAYPAL_INSTRUCTOR_PLAN_ID", "   "),
        ]))
        .unwrap();
        assert_eq!(config.pro_plan_id, None);
        assert_eq!(config.instructor_plan_id, None);
    }

    #[test]
    fn test_invalid_table_entry() {
        let err = PlanConfig::from_lookup(lookup(&[("PAYPAL_PLAN_TIERS", "P-1=GOLD")]))
            .unwrap_err();
        assert!(matches!(err, BillingError::InvalidConfig(_)));

        let err = PlanConfig::from_lookup(lookup(&[("PAYPAL_PLAN_TIERS", "P-1")])).unwrap_err();
        assert!(err.to_string().contains("plan=TIER"));
    }
}
