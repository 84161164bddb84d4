//! Configuration management for the SPL Courier transfer pipeline
//!
//! This crate handles parsing, validation, and management of configuration
//! from YAML files and environment variables.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
