//! Billing errors

use thiserror::Error;

/// Billing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// Plan configuration is invalid
    #[error("invalid plan configuration: {0}")]
    InvalidConfig(String),

    /// Webhook payload could not be parsed
    #[error("webhook error: {0}")]
    WebhookError(String),
}
