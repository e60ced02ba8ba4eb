use crate::domain::entities::CommandCatalog;
use crate::domain::traits::CommandRegistrar;
use crate::application::errors::BotError;

/// Result of one catalog synchronization
#[derive(Debug)]
pub enum SyncOutcome {
    /// No application id configured
    Skipped,
    Registered { count: usize },
    Failed { error: BotError },
}

impl SyncOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, SyncOutcome::Registered { .. })
    }
}

/// Service owning the slash-command catalog and its registration
pub struct CommandService {
    catalog: CommandCatalog,
    application_id: Option<String>,
}

impl CommandService {
    pub fn new(catalog: CommandCatalog, application_id: Option<String>) -> Self {
        Self {
            catalog,
            application_id: application_id.filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Overwrite the platform's command set with the catalog.
    ///
    /// Never fails: a missing application id skips the call, and transport
    /// errors are logged and reported in the outcome.
    pub async fn synchronize<R: CommandRegistrar + ?Sized>(&self, registrar: &R) -> SyncOutcome {
        let Some(application_id) = self.application_id() else {
            tracing::warn!("No application id configured. Slash commands will not be registered.");
            return SyncOutcome::Skipped;
        };

        tracing::info!("Started refreshing {} application (/) commands", self.catalog.len());

        match registrar.bulk_overwrite(application_id, self.catalog.all()).await {
            Ok(count) => {
                tracing::info!("Successfully reloaded {} application (/) commands", count);
                SyncOutcome::Registered { count }
            }
            Err(error) => {
                tracing::error!("Error registering slash commands: {}", error);
                SyncOutcome::Failed { error }
            }
        }
    }
}
