//! Session types

use serde::{Deserialize, Serialize};

use crate::Tier;

/// The user attached to an authenticated session.
///
/// `subscription_tier` comes straight from session storage and is not
/// trusted; use [`SessionUser::tier`] to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User ID
    pub user_id: String,
    /// User email
    #[serde(default)]
    pub email: Option<String>,
    /// Raw subscription tier string
    #[serde(default)]
    pub subscription_tier: Option<String>,
}

impl SessionUser {
    /// Create a session user with a raw tier string
    pub fn new(user_id: impl Into<String>, subscription_tier: Option<&str>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            subscription_tier: subscription_tier.map(str::to_string),
        }
    }

    /// Normalized tier; missing or unknown values are `Free`
    pub fn tier(&self) -> Tier {
        Tier::from_session(self.subscription_tier.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_defaults_to_free() {
        assert_eq!(SessionUser::new("u1", None).tier(), Tier::Free);
        assert_eq!(SessionUser::new("u1", Some("GOLD")).tier(), Tier::Free);
        assert_eq!(SessionUser::new("u1", Some("PRO")).tier(), Tier::Pro);
    }

    #[test]
    fn test_deserialize_without_tier() {
        let user: SessionUser = serde_json::from_str(r#"{"userId":"u1"}"#).unwrap();
        assert_eq!(user.subscription_tier, None);
        assert_eq!(user.tier(), Tier::Free);
    }
}
