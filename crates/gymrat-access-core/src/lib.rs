//! GymRat Access Core - Tier and feature access business logic
//!
//! Feature catalog, the pure access evaluator, and the session-backed
//! feature gate used by request handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gymrat_access_core::{AccessEvaluator, FeatureCatalog, FeatureGate};
//!
//! let evaluator = Arc::new(AccessEvaluator::new(Arc::new(FeatureCatalog::standard())));
//! let gate = FeatureGate::new(evaluator, sessions);
//!
//! // Hard gate: Unauthorized / UpgradeRequired
//! gate.require_feature("AI_NUTRITION").await?;
//!
//! // Soft check
//! if gate.has_feature_access("INSTRUCTOR_CHAT").await { /* ... */ }
//! ```

pub mod catalog;
pub mod crypto;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod session;

pub use catalog::FeatureCatalog;
pub use error::{AccessError, CatalogError, SessionError};
pub use evaluator::{has_access, AccessDecision, AccessEvaluator, TierSummary};
pub use gate::FeatureGate;
pub use session::{SessionPayload, SessionProvider, SessionVerifier, SignedSessionProvider};
