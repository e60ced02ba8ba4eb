//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod registrar;

pub use bot::{latency_millis, Bot, BotInfo, BotStats};
pub use registrar::CommandRegistrar;
