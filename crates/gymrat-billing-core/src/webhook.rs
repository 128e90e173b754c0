//! Subscription webhook events
//!
//! Parses the payment provider's subscription webhook payloads and derives
//! the tier a user should hold afterwards. Verifying that a payload really
//! came from the provider happens before this module is called.

use gymrat_types::Tier;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{BillingError, PlanTierMapper};

/// Webhook event types we handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEventType {
    /// Subscription became active
    Activated,
    /// Subscription was reactivated after suspension
    Reactivated,
    /// Subscription changed (e.g. plan switch)
    Updated,
    /// Subscription cancelled by the user
    Cancelled,
    /// Subscription suspended (e.g. failed payments)
    Suspended,
    /// Subscription reached its end
    Expired,
    /// Unknown event type
    Unknown(String),
}

impl From<&str> for SubscriptionEventType {
    fn from(s: &str) -> Self {
        match s {
            "BILLING.SUBSCRIPTION.ACTIVATED" => Self::Activated,
            "BILLING.SUBSCRIPTION.RE-ACTIVATED" => Self::Reactivated,
            "BILLING.SUBSCRIPTION.UPDATED" => Self::Updated,
            "BILLING.SUBSCRIPTION.CANCELLED" => Self::Cancelled,
            "BILLING.SUBSCRIPTION.SUSPENDED" => Self::Suspended,
            "BILLING.SUBSCRIPTION.EXPIRED" => Self::Expired,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Parsed subscription webhook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEvent {
    /// Event ID
    pub id: String,
    /// Event type
    pub event_type: SubscriptionEventType,
    /// Provider subscription ID
    pub subscription_id: Option<String>,
    /// Provider plan ID
    pub plan_id: Option<String>,
    /// Our user reference, set as `custom_id` at checkout
    pub user_ref: Option<String>,
}

/// Tier a user should be moved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierChange {
    /// User reference
    pub user_ref: String,
    /// Provider subscription ID
    pub subscription_id: Option<String>,
    /// New tier
    pub tier: Tier,
}

impl SubscriptionEvent {
    /// Parse a webhook payload
    #[instrument(skip(payload), fields(len = payload.len()))]
    pub fn parse(payload: &[u8]) -> Result<Self, BillingError> {
        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| BillingError::WebhookError(e.to_string()))?;

        debug!(event_id = %raw.id, event_type = %raw.event_type, "Parsed webhook event");

        let resource = raw.resource.unwrap_or_default();
        Ok(Self {
            id: raw.id,
            event_type: SubscriptionEventType::from(raw.event_type.as_str()),
            subscription_id: resource.id,
            plan_id: resource.plan_id,
            user_ref: resource.custom_id.filter(|s| !s.trim().is_empty()),
        })
    }

    /// Tier change implied by this event, if any
    pub fn tier_change(&self, mapper: &PlanTierMapper) -> Option<TierChange> {
        let tier = match &self.event_type {
            SubscriptionEventType::Activated
            | SubscriptionEventType::Reactivated
            | SubscriptionEventType::Updated => {
                mapper.tier_from_plan_id(self.plan_id.as_deref().unwrap_or_default())
            }
            SubscriptionEventType::Cancelled
            | SubscriptionEventType::Suspended
            | SubscriptionEventType::Expired => Tier::Free,
            SubscriptionEventType::Unknown(event_type) => {
                debug!(event_type = %event_type, "Ignoring webhook event");
                return None;
            }
        };

        let Some(user_ref) = self.user_ref.clone() else {
            warn!(event_id = %self.id, "Subscription event without user reference");
            return None;
        };

        info!(event_id = %self.id, user_ref = %user_ref, tier = %tier, "Subscription tier change");
        Some(TierChange {
            user_ref,
            subscription_id: self.subscription_id.clone(),
            tier,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    event_type: String,
    #[serde(default)]
    resource: Option<RawResource>,
}

#[derive(Debug, Default, Deserialize)]
struct RawResource {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    plan_id: Option<String>,
    #[serde(default)]
    custom_id: Option<String>,
}
