//! Application services - Registration and event orchestration

pub mod command_service;
pub mod event_service;

pub use command_service::CommandService;
pub use event_service::EventService;
