//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod adapters;
