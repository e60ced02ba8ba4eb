//! Domain layer - Core business logic with no platform dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (User, IncomingMessage, Interaction, Reply)
//! - Traits: Abstractions for infrastructure (Bot, CommandRegistrar)

pub mod entities;
pub mod traits;
