//! Message handling - Event-driven command dispatch

pub mod dispatcher;
pub mod interactions;
pub mod parser;
pub mod replies;

#[cfg(test)]
mod tests;

pub use dispatcher::{DispatchOutcome, IgnoreReason, MessageDispatcher};
pub use interactions::{InteractionDispatcher, InteractionOutcome};
