//! Launchpad Core
//!
//! Shared types for the Launchpad deployment orchestrator.
//!
//! This crate contains:
//! - Domain types: records read from the CI service and cloud APIs (Build, Project, etc.)
//! - DTOs: request/response bodies sent to those services

pub mod domain;
pub mod dto;
