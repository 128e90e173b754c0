//! Application state for the Access API service.

use std::sync::Arc;

use gymrat_access_core::{AccessEvaluator, FeatureCatalog, SessionVerifier};
use gymrat_billing_core::PlanTierMapper;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Access evaluator over the loaded catalog
    pub evaluator: Arc<AccessEvaluator>,
    /// Session token verifier
    pub sessions: SessionVerifier,
    /// Billing plan resolution
    pub plans: Arc<PlanTierMapper>,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: FeatureCatalog, sessions: SessionVerifier, config: Config) -> Self {
        Self {
            evaluator: Arc::new(AccessEvaluator::new(Arc::new(catalog))),
            sessions,
            plans: Arc::new(PlanTierMapper::new(config.plans.clone())),
            config: Arc::new(config),
        }
    }

    /// Build state from configuration, loading the feature catalog
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let catalog = match &config.feature_catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalog = FeatureCatalog::from_json(&json)?;
                tracing::info!(
                    path = %path.display(),
                    features = catalog.len(),
                    "Loaded feature catalog"
                );
                catalog
            }
            None => FeatureCatalog::standard(),
        };
        let sessions = SessionVerifier::new(&config.session_secret)?;
        Ok(Self::new(catalog, sessions, config))
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
