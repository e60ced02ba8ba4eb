//! Test doubles for the platform seams

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDescriptor, IncomingMessage, Interaction, Reply, User};
use crate::domain::traits::{Bot, BotInfo, BotStats, CommandRegistrar};

/// A platform call captured by `RecordingBot`
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    MessageReply { message_id: String, reply: Reply },
    Response { interaction_id: String, reply: Reply },
    Defer { interaction_id: String, ephemeral: bool },
    FollowUp { interaction_id: String, reply: Reply },
}

impl Sent {
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Sent::MessageReply { reply, .. } | Sent::Response { reply, .. } | Sent::FollowUp { reply, .. } => Some(reply),
            Sent::Defer { .. } => None,
        }
    }
}

/// Records every successful call; failure counters make the next N calls
/// of a primitive fail with a network error.
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    pub latency: Option<Duration>,
    pub stats: Option<BotStats>,
    fail_respond: AtomicUsize,
    fail_follow_up: AtomicUsize,
    fail_message_reply: AtomicUsize,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            latency: Some(Duration::from_millis(42)),
            stats: Some(BotStats { guilds: 2, users: 10 }),
            fail_respond: AtomicUsize::new(0),
            fail_follow_up: AtomicUsize::new(0),
            fail_message_reply: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn without_stats(mut self) -> Self {
        self.stats = None;
        self
    }

    pub fn failing_responds(self, times: usize) -> Self {
        self.fail_respond.store(times, Ordering::SeqCst);
        self
    }

    pub fn failing_follow_ups(self, times: usize) -> Self {
        self.fail_follow_up.store(times, Ordering::SeqCst);
        self
    }

    pub fn failing_message_replies(self, times: usize) -> Self {
        self.fail_message_reply.store(times, Ordering::SeqCst);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, sent: Sent) {
        if let Ok(mut log) = self.sent.lock() {
            log.push(sent);
        }
    }

    fn should_fail(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for RecordingBot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn reply_to_message(&self, message: &IncomingMessage, reply: &Reply) -> Result<(), BotError> {
        if Self::should_fail(&self.fail_message_reply) {
            return Err(BotError::Network("message reply rejected".to_string()));
        }
        self.record(Sent::MessageReply { message_id: message.id.clone(), reply: reply.clone() });
        Ok(())
    }

    async fn respond(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        if Self::should_fail(&self.fail_respond) {
            return Err(BotError::Network("interaction response rejected".to_string()));
        }
        self.record(Sent::Response { interaction_id: interaction.id.clone(), reply: reply.clone() });
        Ok(())
    }

    async fn defer(&self, interaction: &Interaction, ephemeral: bool) -> Result<(), BotError> {
        self.record(Sent::Defer { interaction_id: interaction.id.clone(), ephemeral });
        Ok(())
    }

    async fn follow_up(&self, interaction: &Interaction, reply: &Reply) -> Result<(), BotError> {
        if Self::should_fail(&self.fail_follow_up) {
            return Err(BotError::Network("follow-up rejected".to_string()));
        }
        self.record(Sent::FollowUp { interaction_id: interaction.id.clone(), reply: reply.clone() });
        Ok(())
    }

    async fn latency(&self) -> Option<Duration> {
        self.latency
    }

    async fn stats(&self) -> Result<BotStats, BotError> {
        self.stats
            .ok_or_else(|| BotError::Gateway("cache unavailable".to_string()))
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "999".to_string(),
            name: "test-bot".to_string(),
        }
    }
}

/// Registrar that records calls and returns a scripted result
pub struct ScriptedRegistrar {
    calls: Mutex<Vec<(String, Vec<CommandDescriptor>)>>,
    fail_with: Option<String>,
}

impl ScriptedRegistrar {
    pub fn succeeding() -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_with: None }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_with: Some(message.into()) }
    }

    pub fn calls(&self) -> Vec<(String, Vec<CommandDescriptor>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CommandRegistrar for ScriptedRegistrar {
    async fn bulk_overwrite(&self, application_id: &str, commands: &[CommandDescriptor]) -> Result<usize, BotError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((application_id.to_string(), commands.to_vec()));
        }
        match &self.fail_with {
            Some(message) => Err(BotError::Network(message.clone())),
            None => Ok(commands.len()),
        }
    }
}

/// Formatted log output of the current thread, collected while the guard lives
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        (capture, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut log) = self.0.lock() {
            log.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn human(name: &str) -> User {
    User::new(format!("{}-id", name.to_lowercase()), name)
}

pub fn message_from(author: User, text: &str) -> IncomingMessage {
    IncomingMessage::new("chan-1", author, text).with_id("msg-1")
}

pub fn interaction_for(command: &str) -> Interaction {
    Interaction::new("int-1", "token-1", command, human("Bob")).with_channel("chan-1")
}
