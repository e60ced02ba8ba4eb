use async_trait::async_trait;
use crate::domain::entities::CommandDescriptor;
use crate::application::errors::BotError;

/// Registrar trait - transport for pushing the command catalog to the platform
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace every registered command of `application_id` with `commands`.
    /// Returns the number of commands the platform now reports.
    async fn bulk_overwrite(&self, application_id: &str, commands: &[CommandDescriptor]) -> Result<usize, BotError>;
}
