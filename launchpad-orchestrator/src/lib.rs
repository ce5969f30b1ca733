pub mod api;
pub mod config;
pub mod repository;
pub mod service;
pub mod state;
