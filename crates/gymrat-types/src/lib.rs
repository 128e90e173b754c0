//! GymRat Types - Shared domain types
//!
//! This crate contains domain types used across GymRat+ services:
//! - Subscription tiers and their ordering
//! - Gateable features
//! - Session users as handed over by the auth layer

pub mod feature;
pub mod session;
pub mod tier;

pub use feature::*;
pub use session::*;
pub use tier::*;
