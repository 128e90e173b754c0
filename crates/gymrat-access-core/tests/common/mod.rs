//! Shared test helpers

pub mod mock_sessions;

use std::sync::Arc;

use gymrat_access_core::{AccessEvaluator, FeatureCatalog};

/// Evaluator over the standard catalog
#[allow(dead_code)]
pub fn standard_evaluator() -> Arc<AccessEvaluator> {
    Arc::new(AccessEvaluator::new(Arc::new(FeatureCatalog::standard())))
}
