//! Repository Module
//!
//! Access layer for the remote services the orchestrator depends on.
//! Each repository is a trait so services can run against in-memory fakes;
//! the production implementations are the HTTP clients from `launchpad-client`.

pub mod build;
pub mod key;
pub mod object;
pub mod price;

#[cfg(test)]
pub(crate) mod fake;

// Re-export traits
pub use build::BuildRepository;
pub use key::KeyRepository;
pub use object::ObjectRepository;
pub use price::PriceCatalog;
