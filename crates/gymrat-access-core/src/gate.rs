//! Session-backed feature gate
//!
//! Resolves the caller's tier from a [`SessionProvider`] and evaluates it
//! against the [`AccessEvaluator`]. Two calling conventions:
//!
//! - [`FeatureGate::require_feature`] is the hard gate for enforcement
//!   points and returns an [`AccessError`] on denial.
//! - [`FeatureGate::has_feature_access`] is the soft check for conditional
//!   logic and always returns a `bool`.
//!
//! Each operation reads the session exactly once. Nothing is cached.

use std::sync::Arc;

use gymrat_types::{FeatureId, SessionUser, Tier};
use tracing::{debug, warn};

use crate::{AccessDecision, AccessError, AccessEvaluator, SessionProvider};

/// Feature gate bound to one session source
pub struct FeatureGate<P: SessionProvider> {
    evaluator: Arc<AccessEvaluator>,
    sessions: P,
}

impl<P: SessionProvider> FeatureGate<P> {
    /// Create a gate
    pub fn new(evaluator: Arc<AccessEvaluator>, sessions: P) -> Self {
        Self {
            evaluator,
            sessions,
        }
    }

    /// Fail unless the signed-in user's tier unlocks `feature_id`
    pub async fn require_feature(&self, feature_id: &str) -> Result<(), AccessError> {
        let result = self.require(feature_id).await;
        record("require", &result);
        result
    }

    /// Whether the signed-in user may use `feature_id`; never fails.
    ///
    /// A missing session and a failing session backend both read as
    /// `false`. Use [`check_feature_access`](Self::check_feature_access)
    /// when the difference matters.
    pub async fn has_feature_access(&self, feature_id: &str) -> bool {
        match self.check_feature_access(feature_id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(feature = feature_id, error = %e, "Soft feature check failed closed");
                false
            }
        }
    }

    /// Soft check that still reports session backend failures
    pub async fn check_feature_access(&self, feature_id: &str) -> Result<bool, AccessError> {
        let result = match self.session().await {
            Ok(Some(user)) => Ok(self.evaluator.can_access_feature(user.tier(), feature_id)),
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        };
        metrics::counter!(
            "access_checks_total",
            "operation" => "check",
            "outcome" => match &result {
                Ok(true) => "allowed",
                Ok(false) => "denied",
                Err(_) => "error",
            }
        )
        .increment(1);
        result
    }

    /// Tier of the signed-in user, `Free` when signed out
    pub async fn current_tier(&self) -> Tier {
        match self.session().await {
            Ok(Some(user)) => user.tier(),
            Ok(None) => Tier::Free,
            Err(e) => {
                warn!(error = %e, "Falling back to free tier");
                Tier::Free
            }
        }
    }

    /// The evaluator behind this gate
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    async fn require(&self, feature_id: &str) -> Result<(), AccessError> {
        let user = self.session().await?.ok_or_else(|| {
            debug!(feature = feature_id, "No session for gated feature");
            AccessError::Unauthorized
        })?;

        let tier = user.tier();
        match self.evaluator.check(tier, feature_id) {
            AccessDecision::Allowed => Ok(()),
            decision => {
                debug!(
                    user_id = %user.user_id,
                    tier = %tier,
                    feature = feature_id,
                    ?decision,
                    "Feature denied"
                );
                Err(AccessError::UpgradeRequired {
                    feature: FeatureId::new(feature_id),
                    required_tier: decision.required_tier(),
                })
            }
        }
    }

    async fn session(&self) -> Result<Option<SessionUser>, AccessError> {
        Ok(self.sessions.get_session().await?)
    }
}

fn record(operation: &'static str, result: &Result<(), AccessError>) {
    let outcome = match result {
        Ok(()) => "allowed",
        Err(AccessError::Unauthorized) => "unauthorized",
        Err(AccessError::UpgradeRequired { .. }) => "upgrade_required",
        Err(AccessError::SessionUnavailable(_)) => "error",
    };
    metrics::counter!("access_checks_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

impl<P: SessionProvider> std::fmt::Debug for FeatureGate<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureGate").finish_non_exhaustive()
    }
}
