//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services orchestrate between repositories and contain the deploy workflow.

pub mod artifact;
pub mod credentials;
pub mod deploy;
pub mod error;
pub mod locator;
pub mod poller;
pub mod pricing;

// Re-export for convenience
pub use deploy as deploy_service;
pub use error::{DeployError, PricingError};
pub use pricing as pricing_service;
