use super::User;
use chrono::{DateTime, Utc};

/// Message content after prefix parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    Empty,
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// A message received from the gateway
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(channel_id: impl Into<String>, author: User, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id: channel_id.into(),
            author,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn from_bot(&self) -> bool {
        self.author.is_bot
    }
}
