//! Message parser - Turns raw message text into prefix commands

use crate::domain::entities::Content;

/// Parses prefixed text messages into structured content
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message.
    ///
    /// Text without the prefix stays `Content::Text`. A bare prefix yields a
    /// command with an empty name.
    pub fn parse(&self, text: &str) -> Content {
        if text.is_empty() {
            return Content::Empty;
        }

        match text.strip_prefix(self.command_prefix.as_str()) {
            Some(rest) if !self.command_prefix.is_empty() => Self::parse_command(rest),
            _ => Content::Text(text.to_string()),
        }
    }

    fn parse_command(rest: &str) -> Content {
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args = parts.map(str::to_string).collect();

        Content::Command { name, args }
    }
}
