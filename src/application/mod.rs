//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Command registration and event orchestration
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing, prefix and slash dispatching

pub mod errors;
pub mod services;
pub mod messaging;

#[cfg(test)]
pub mod testing;
