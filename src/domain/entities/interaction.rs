use std::fmt;

use super::User;
use crate::application::errors::ReplyStateError;

/// Acknowledgement state of an interaction.
///
/// `Unanswered -> {Replied, Deferred} -> FollowedUp (repeatable)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Unanswered,
    Deferred,
    Replied,
    FollowedUp,
}

/// Reply primitive offered by the platform for interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyAction {
    /// Initial response carrying content
    Reply,
    /// Initial response acknowledging without content
    Defer,
    /// Additional message after acknowledgement
    FollowUp,
}

impl fmt::Display for ReplyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyAction::Reply => write!(f, "reply"),
            ReplyAction::Defer => write!(f, "defer"),
            ReplyAction::FollowUp => write!(f, "follow-up"),
        }
    }
}

impl ReplyState {
    /// Whether an initial response was already sent
    pub fn is_acknowledged(&self) -> bool {
        !matches!(self, ReplyState::Unanswered)
    }

    /// State after `action` succeeds, or why `action` is illegal now
    pub fn transition(self, action: ReplyAction) -> Result<ReplyState, ReplyStateError> {
        match (self, action) {
            (ReplyState::Unanswered, ReplyAction::Reply) => Ok(ReplyState::Replied),
            (ReplyState::Unanswered, ReplyAction::Defer) => Ok(ReplyState::Deferred),
            (ReplyState::Unanswered, ReplyAction::FollowUp) => {
                Err(ReplyStateError::NotAcknowledged)
            }
            (_, ReplyAction::FollowUp) => Ok(ReplyState::FollowedUp),
            (state, action) => Err(ReplyStateError::AlreadyAcknowledged { state, action }),
        }
    }

    /// Primitive that delivers a message in this state
    pub fn message_action(&self) -> ReplyAction {
        if self.is_acknowledged() {
            ReplyAction::FollowUp
        } else {
            ReplyAction::Reply
        }
    }
}

impl fmt::Display for ReplyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyState::Unanswered => write!(f, "unanswered"),
            ReplyState::Deferred => write!(f, "deferred"),
            ReplyState::Replied => write!(f, "replied"),
            ReplyState::FollowedUp => write!(f, "followed-up"),
        }
    }
}

/// A slash-command invocation
#[derive(Debug, Clone)]
pub struct Interaction {
    pub id: String,
    pub token: String,
    pub command_name: String,
    pub user: User,
    pub channel_id: Option<String>,
    pub guild_id: Option<String>,
    state: ReplyState,
}

impl Interaction {
    pub fn new(id: impl Into<String>, token: impl Into<String>, command_name: impl Into<String>, user: User) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            command_name: command_name.into(),
            user,
            channel_id: None,
            guild_id: None,
            state: ReplyState::Unanswered,
        }
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn state(&self) -> ReplyState {
        self.state
    }

    /// Fails without changing state if `action` is illegal
    pub fn check(&self, action: ReplyAction) -> Result<ReplyState, ReplyStateError> {
        self.state.transition(action)
    }

    /// Records that `action` was delivered
    pub fn advance(&mut self, action: ReplyAction) -> Result<(), ReplyStateError> {
        self.state = self.state.transition(action)?;
        Ok(())
    }
}
