/// A remote-invocable command as registered with the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    /// Shorter text for the help listing; not sent to the platform
    pub summary: Option<String>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Help text, falling back to the registered description
    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.description)
    }
}

/// Fixed, ordered catalog of slash commands
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: Vec<CommandDescriptor>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog this bot ships with
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(CommandDescriptor::new("info", "Get bot information"));
        catalog.register(CommandDescriptor::new("ping", "Check bot latency").with_summary("Check latency"));
        catalog
    }

    /// Adds a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, command: CommandDescriptor) {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn all(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
