//! Data Transfer Objects
//!
//! Bodies sent to (or parsed from) external services that have no domain
//! meaning of their own.

pub mod billing;
pub mod trigger;
