//! GymRat Billing Core - Billing plan handling
//!
//! Maps payment-provider plan identifiers onto subscription tiers and
//! turns subscription webhook events into tier changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use gymrat_billing_core::{PlanConfig, PlanTierMapper, SubscriptionEvent};
//!
//! let mapper = PlanTierMapper::new(PlanConfig::from_env()?);
//!
//! let event = SubscriptionEvent::parse(&body)?;
//! if let Some(change) = event.tier_change(&mapper) {
//!     users.update_tier(&change.user_ref, change.tier).await?;
//! }
//! ```

pub mod config;
pub mod error;
pub mod plan;
pub mod webhook;

pub use config::PlanConfig;
pub use error::BillingError;
pub use plan::PlanTierMapper;
pub use webhook::{SubscriptionEvent, SubscriptionEventType, TierChange};
