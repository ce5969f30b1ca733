//! Core domain types
//!
//! These types mirror the records returned by the CI service and the IAM API.
//! They are fetched fresh for every request and never persisted.

pub mod artifact;
pub mod build;
pub mod credential;
pub mod project;
