//! Dispatch tests for both command paths

use std::time::Duration;

use crate::application::errors::{BotError, ReplyStateError};
use crate::application::testing::{human, interaction_for, message_from, RecordingBot, Sent};
use crate::domain::entities::{CommandCatalog, ReplyAction, ReplyState, User};
use super::interactions::{recover, InteractionResponder, SlashCommand};
use super::*;

fn dispatcher() -> MessageDispatcher {
    MessageDispatcher::new("!", CommandCatalog::builtin())
}

#[tokio::test]
async fn test_bot_authors_are_ignored() {
    let bot = RecordingBot::new();
    let author = User::new("5", "OtherBot").as_bot();

    for text in ["!ping", "!help", "!nope", "hi"] {
        let outcome = dispatcher().dispatch(&bot, &message_from(author.clone(), text)).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::FromBot));
    }
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_unprefixed_messages_are_ignored() {
    let bot = RecordingBot::new();

    for text in ["ping", "hello !ping", "", "/ping"] {
        let outcome = dispatcher().dispatch(&bot, &message_from(human("Alice"), text)).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored(IgnoreReason::NoPrefix));
    }
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_ping_replies_once_with_latency() {
    let bot = RecordingBot::new().with_latency(Some(Duration::from_millis(123)));

    dispatcher().dispatch(&bot, &message_from(human("Alice"), "!ping")).await.unwrap();

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply().and_then(|r| r.as_text()), Some("Pong! Latency: 123ms"));
}

#[tokio::test]
async fn test_ping_before_first_heartbeat_is_zero() {
    let bot = RecordingBot::new().with_latency(None);

    dispatcher().dispatch(&bot, &message_from(human("Alice"), "!PING")).await.unwrap();

    let text = bot.sent()[0].reply().and_then(|r| r.as_text()).unwrap_or_default().to_string();
    let millis: u64 = text
        .trim_start_matches("Pong! Latency: ")
        .trim_end_matches("ms")
        .parse()
        .expect("latency is a non-negative integer");
    assert_eq!(millis, 0);
}

#[tokio::test]
async fn test_hello_mentions_author() {
    let bot = RecordingBot::new();
    let alice = User::new("1001", "Alice");

    dispatcher().dispatch(&bot, &message_from(alice, "!hello there")).await.unwrap();

    assert_eq!(
        bot.sent(),
        vec![Sent::MessageReply {
            message_id: "msg-1".to_string(),
            reply: crate::domain::entities::Reply::text("Hello <@1001>! 👋"),
        }]
    );
}

#[tokio::test]
async fn test_help_lists_five_commands() {
    let bot = RecordingBot::new();

    dispatcher().dispatch(&bot, &message_from(human("Alice"), "!help")).await.unwrap();

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    let embed = sent[0].reply().and_then(|r| r.as_embed()).expect("help embed");
    assert_eq!(embed.field_names(), vec!["!ping", "!hello", "!help", "/info", "/ping"]);
}

#[tokio::test]
async fn test_unknown_prefix_command() {
    let bot = RecordingBot::new();

    for text in ["!dance", "!"] {
        dispatcher().dispatch(&bot, &message_from(human("Alice"), text)).await.unwrap();
    }

    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    for s in sent {
        assert_eq!(
            s.reply().and_then(|r| r.as_text()),
            Some("Unknown command. Use `!help` to see available commands.")
        );
    }
}

#[tokio::test]
async fn test_custom_prefix_in_help_and_unknown() {
    let bot = RecordingBot::new();
    let dispatcher = MessageDispatcher::new("$", CommandCatalog::builtin());

    dispatcher.dispatch(&bot, &message_from(human("Alice"), "$help")).await.unwrap();
    dispatcher.dispatch(&bot, &message_from(human("Alice"), "$what")).await.unwrap();
    let ignored = dispatcher.dispatch(&bot, &message_from(human("Alice"), "!help")).await.unwrap();

    assert_eq!(ignored, DispatchOutcome::Ignored(IgnoreReason::NoPrefix));
    let sent = bot.sent();
    let embed = sent[0].reply().and_then(|r| r.as_embed()).expect("help embed");
    assert_eq!(embed.fields[0].name, "$ping");
    assert_eq!(
        sent[1].reply().and_then(|r| r.as_text()),
        Some("Unknown command. Use `$help` to see available commands.")
    );
}

#[tokio::test]
async fn test_message_reply_failure_is_returned_not_retried() {
    let bot = RecordingBot::new().failing_message_replies(1);

    let result = dispatcher().dispatch(&bot, &message_from(human("Alice"), "!ping")).await;

    assert!(matches!(result, Err(BotError::Network(_))));
    assert!(bot.sent().is_empty());
}

#[test]
fn test_every_catalog_command_is_routable() {
    let dispatcher = InteractionDispatcher::new();
    for command in CommandCatalog::builtin().all() {
        assert!(dispatcher.lookup(&command.name).is_some(), "/{} has no handler", command.name);
    }
    assert_eq!(SlashCommand::ALL.len(), CommandCatalog::builtin().len());
}

#[tokio::test]
async fn test_slash_ping() {
    let bot = RecordingBot::new().with_latency(Some(Duration::from_millis(7)));
    let mut interaction = interaction_for("ping");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    assert!(outcome.is_completed());
    assert_eq!(interaction.state(), ReplyState::Replied);
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Response { .. }));
    assert_eq!(sent[0].reply().and_then(|r| r.as_text()), Some("Pong! Latency: 7ms"));
}

#[tokio::test]
async fn test_slash_info_embed() {
    let bot = RecordingBot::new();
    let mut interaction = interaction_for("info");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    assert!(outcome.is_completed());
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    let embed = sent[0].reply().and_then(|r| r.as_embed()).expect("info embed");
    assert_eq!(embed.title, "Bot Information");
    assert_eq!(embed.field_names(), vec!["Guilds", "Users", "Latency"]);
    assert_eq!(embed.fields[0].value, "2");
    assert_eq!(embed.fields[1].value, "10");
}

#[tokio::test]
async fn test_unknown_slash_command_is_ephemeral() {
    let bot = RecordingBot::new();
    let mut interaction = interaction_for("dance");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    assert!(outcome.is_completed());
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    let reply = sent[0].reply().expect("reply");
    assert_eq!(reply.as_text(), Some("Unknown command!"));
    assert!(reply.ephemeral);
}

#[tokio::test]
async fn test_handler_failure_before_reply_uses_initial_reply() {
    let bot = RecordingBot::new().without_stats();
    let mut interaction = interaction_for("info");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    match outcome {
        InteractionOutcome::Recovered { error, fallback } => {
            assert!(matches!(error, BotError::Gateway(_)));
            assert_eq!(fallback.ok(), Some(ReplyAction::Reply));
        }
        InteractionOutcome::Completed => panic!("expected recovery"),
    }

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Response { .. }));
    let reply = sent[0].reply().expect("reply");
    assert_eq!(reply.as_text(), Some("There was an error executing this command!"));
    assert!(reply.ephemeral);
}

#[tokio::test]
async fn test_failed_initial_send_falls_back_to_initial_reply() {
    let bot = RecordingBot::new().failing_responds(1);
    let mut interaction = interaction_for("ping");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    assert!(!outcome.is_completed());
    assert_eq!(interaction.state(), ReplyState::Replied);
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply().and_then(|r| r.as_text()), Some("There was an error executing this command!"));
}

#[tokio::test]
async fn test_failure_after_defer_uses_follow_up() {
    let bot = RecordingBot::new();
    let mut interaction = interaction_for("ping");

    let result = {
        let mut responder = InteractionResponder::new(&bot, &mut interaction);
        responder.defer(false).await.unwrap();
        Err(BotError::Internal("boom".to_string()))
    };
    let outcome = recover(&bot, &mut interaction, result).await;

    assert!(matches!(
        outcome,
        InteractionOutcome::Recovered { fallback: Ok(ReplyAction::FollowUp), .. }
    ));
    assert_eq!(interaction.state(), ReplyState::FollowedUp);
    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[0], Sent::Defer { .. }));
    assert!(matches!(&sent[1], Sent::FollowUp { reply, .. } if reply.ephemeral));
}

#[tokio::test]
async fn test_failure_after_reply_never_replies_twice() {
    let bot = RecordingBot::new();
    let mut interaction = interaction_for("ping");

    let result = {
        let mut responder = InteractionResponder::new(&bot, &mut interaction);
        responder.reply(&crate::domain::entities::Reply::text("partial")).await.unwrap();
        responder.reply(&crate::domain::entities::Reply::text("again")).await
    };
    assert!(matches!(
        result,
        Err(BotError::ReplyState(ReplyStateError::AlreadyAcknowledged { .. }))
    ));

    recover(&bot, &mut interaction, result).await;

    let initial = bot.sent().iter().filter(|s| matches!(s, Sent::Response { .. })).count();
    assert_eq!(initial, 1);
    assert!(matches!(bot.sent().last(), Some(Sent::FollowUp { .. })));
}

#[tokio::test]
async fn test_fallback_failure_is_reported() {
    let bot = RecordingBot::new().failing_responds(2);
    let mut interaction = interaction_for("ping");

    let outcome = InteractionDispatcher::new().dispatch(&bot, &mut interaction).await;

    match outcome {
        InteractionOutcome::Recovered { fallback, .. } => assert!(fallback.is_err()),
        InteractionOutcome::Completed => panic!("expected recovery"),
    }
    assert_eq!(interaction.state(), ReplyState::Unanswered);
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_follow_up_before_acknowledgement_is_rejected() {
    let bot = RecordingBot::new();
    let mut interaction = interaction_for("ping");
    let mut responder = InteractionResponder::new(&bot, &mut interaction);

    let result = responder.follow_up(&crate::domain::entities::Reply::text("x")).await;

    assert!(matches!(result, Err(BotError::ReplyState(ReplyStateError::NotAcknowledged))));
    assert!(bot.sent().is_empty());
}
